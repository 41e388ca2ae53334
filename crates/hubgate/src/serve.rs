// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hubgate serve` command implementation.
//!
//! Installs the metrics recorder, loads every declared service into a fresh
//! registry (fail-fast), then runs the gateway until SIGINT or SIGTERM.

use std::sync::Arc;

use hubgate_config::HubgateConfig;
use hubgate_core::{HubgateError, ServiceDeclaration};
use hubgate_gateway::{GatewayState, ServerConfig};
use hubgate_prometheus::{MetricsRender, PrometheusExporter};
use hubgate_registry::{BuiltinCatalog, ServiceLoader, ServiceRegistry};
use tracing::{debug, error, info, warn};

use crate::shutdown;

/// Build a registry holding every declared service.
///
/// Any failure aborts the whole load; no partially filled registry is
/// returned.
pub fn build_registry(
    catalog: BuiltinCatalog,
    services: &[ServiceDeclaration],
) -> Result<Arc<ServiceRegistry>, HubgateError> {
    let loader = ServiceLoader::new(catalog);
    let registry = Arc::new(ServiceRegistry::new());
    let count = loader.load_all(&registry, services)?;
    hubgate_prometheus::set_registered_services(registry.len());
    info!(count, "all services loaded");
    Ok(registry)
}

/// Gateway state derived from configuration.
pub fn gateway_state(
    config: &HubgateConfig,
    registry: Arc<ServiceRegistry>,
    metrics_render: Option<MetricsRender>,
) -> GatewayState {
    GatewayState {
        registry,
        max_body_bytes: config.server.max_body_bytes,
        adapter_timeout: config.server.adapter_timeout(),
        metrics_render,
    }
}

/// Install the Prometheus recorder if enabled.
///
/// A failed install is logged and the gateway runs without metrics.
fn init_metrics(enabled: bool) -> Option<PrometheusExporter> {
    if !enabled {
        debug!("prometheus metrics disabled by configuration");
        return None;
    }
    match PrometheusExporter::install() {
        Ok(exporter) => {
            info!("prometheus metrics enabled");
            Some(exporter)
        }
        Err(e) => {
            warn!(error = %e, "prometheus initialization failed, continuing without metrics");
            None
        }
    }
}

/// Listener settings derived from configuration.
pub fn server_config(config: &HubgateConfig) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        cors_permissive: config.server.cors_permissive,
        shutdown_grace: config.server.shutdown_grace(),
    }
}

/// Runs the `hubgate serve` command.
pub async fn run_serve(config: HubgateConfig) -> Result<(), HubgateError> {
    init_tracing(&config.server.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        services = config.services.len(),
        "starting hubgate"
    );

    let exporter = init_metrics(config.server.metrics_enabled);

    let registry = build_registry(hubgate_integrations::builtin_catalog(), &config.services)
        .inspect_err(|e| error!(error = %e, "failed to load services"))?;

    let state = gateway_state(&config, registry, exporter.as_ref().map(PrometheusExporter::render_fn));
    let cancel = shutdown::install_signal_handler();

    hubgate_gateway::start_server(&server_config(&config), state, cancel).await?;

    info!("hubgate exited gracefully");
    Ok(())
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("hubgate={log_level},tower_http=warn,warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_registry_from_builtins() {
        let services = vec![
            ServiceDeclaration::builtin("echo", ""),
            ServiceDeclaration::builtin("minio", "http://localhost:9000"),
        ];
        let registry = build_registry(hubgate_integrations::builtin_catalog(), &services).unwrap();
        assert_eq!(registry.list(), vec!["echo", "minio"]);
    }

    #[test]
    fn failed_declaration_leaves_nothing_servable() {
        let services = vec![
            ServiceDeclaration::builtin("echo", ""),
            ServiceDeclaration {
                options: Default::default(),
                ..ServiceDeclaration::dynamic("ext", "", "")
            },
            ServiceDeclaration::builtin("repocate", "http://localhost:4000"),
        ];
        let err = build_registry(hubgate_integrations::builtin_catalog(), &services).unwrap_err();
        assert!(err.to_string().contains("ext"));
    }

    #[test]
    fn state_and_listener_follow_config() {
        let mut config = HubgateConfig::default();
        config.server.port = 9999;
        config.server.max_body_bytes = 1024;
        config.server.adapter_timeout_secs = Some(7);

        let state = gateway_state(&config, Arc::new(ServiceRegistry::new()), None);
        assert_eq!(state.max_body_bytes, 1024);
        assert_eq!(state.adapter_timeout, Some(std::time::Duration::from_secs(7)));
        assert!(state.metrics_render.is_none());

        let listener = server_config(&config);
        assert_eq!(listener.port, 9999);
        assert_eq!(listener.shutdown_grace, std::time::Duration::from_secs(15));
    }
}
