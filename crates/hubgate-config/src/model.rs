// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Hubgate gateway.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use hubgate_core::ServiceDeclaration;
use serde::{Deserialize, Serialize};

/// Top-level Hubgate configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides for the `[server]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HubgateConfig {
    /// HTTP listener and request handling settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend services to load at startup, in declaration order.
    #[serde(default)]
    pub services: Vec<ServiceDeclaration>,
}

/// HTTP listener and request handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Largest request body accepted before dispatch.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Upper bound on a single adapter call. `None` leaves calls unbounded.
    #[serde(default)]
    pub adapter_timeout_secs: Option<u64>,

    /// Time allowed for in-flight requests after a shutdown signal.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,

    /// Send permissive CORS headers and answer preflight requests.
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,

    /// Install the Prometheus recorder and serve GET /metrics.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The adapter call bound, if one is configured.
    pub fn adapter_timeout(&self) -> Option<Duration> {
        self.adapter_timeout_secs.map(Duration::from_secs)
    }

    /// The graceful shutdown window.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_body_bytes: default_max_body_bytes(),
            adapter_timeout_secs: None,
            shutdown_grace_secs: default_shutdown_grace_secs(),
            cors_permissive: default_cors_permissive(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_shutdown_grace_secs() -> u64 {
    15
}

fn default_cors_permissive() -> bool {
    true
}

fn default_metrics_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubgate_core::ServiceKind;

    #[test]
    fn default_server_binds_loopback() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_address(), "127.0.0.1:8080");
        assert!(server.adapter_timeout().is_none());
        assert_eq!(server.shutdown_grace(), Duration::from_secs(15));
        assert!(server.metrics_enabled);
    }

    #[test]
    fn services_array_deserializes_in_order() {
        let toml_str = r#"
[[services]]
name = "minio"
kind = "builtin"
endpoint = "http://localhost:9000"

[[services]]
name = "ext"
kind = "dynamic"
endpoint = "http://localhost:7000"
options = { path = "/opt/hubgate/libext.so", region = "eu" }
"#;
        let config: HubgateConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[0].name, "minio");
        assert_eq!(config.services[0].kind, ServiceKind::Builtin);
        assert_eq!(config.services[1].kind, ServiceKind::Dynamic);
        assert_eq!(config.services[1].plugin_path(), Some("/opt/hubgate/libext.so"));
        assert_eq!(config.services[1].option("region"), Some("eu"));
    }

    #[test]
    fn unknown_service_kind_is_rejected() {
        let toml_str = r#"
[[services]]
name = "legacy"
kind = "plugin"
"#;
        assert!(toml::from_str::<HubgateConfig>(toml_str).is_err());
    }

    #[test]
    fn server_deny_unknown_fields() {
        let toml_str = r#"
[server]
hots = "0.0.0.0"
"#;
        assert!(toml::from_str::<HubgateConfig>(toml_str).is_err());
    }

    #[test]
    fn adapter_timeout_converts_to_duration() {
        let toml_str = r#"
[server]
adapter_timeout_secs = 3
"#;
        let config: HubgateConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.adapter_timeout(), Some(Duration::from_secs(3)));
    }
}
