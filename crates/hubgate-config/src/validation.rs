// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: bind address shape, body and timeout bounds, and the
//! consistency of the declared service list.

use std::collections::HashSet;

use hubgate_core::ServiceKind;

use crate::diagnostic::ConfigError;
use crate::model::HubgateConfig;

/// Log levels accepted by `server.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Names taken by fixed gateway routes under `/api/`.
pub const RESERVED_SERVICE_NAMES: &[&str] = &["health", "services"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HubgateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level `{}` must be one of: {}",
                config.server.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.server.max_body_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "server.max_body_bytes must be greater than 0".to_string(),
        });
    }

    if config.server.adapter_timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "server.adapter_timeout_secs must be at least 1 when set".to_string(),
        });
    }

    let mut seen_names = HashSet::new();
    for (i, service) in config.services.iter().enumerate() {
        let name = service.name.as_str();

        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("services[{i}].name must not be empty"),
            });
            continue;
        }

        // Registered verbatim, so padding would make the service unreachable.
        if name.trim() != name {
            errors.push(ConfigError::Validation {
                message: format!(
                    "services[{i}].name `{name}` must not have leading or trailing whitespace"
                ),
            });
        }

        if RESERVED_SERVICE_NAMES.contains(&name) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "services[{i}].name `{name}` is reserved (GET /api/{name} is a gateway route)"
                ),
            });
        }

        if name.contains('/') {
            errors.push(ConfigError::Validation {
                message: format!(
                    "services[{i}].name `{name}` must not contain `/` (it is a single path segment)"
                ),
            });
        }

        // The registry itself is last-write-wins; refusing duplicates here keeps
        // one declaration from silently shadowing another at startup.
        if !seen_names.insert(name) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate service name `{name}` in [[services]] array"),
            });
        }

        if service.kind == ServiceKind::Dynamic
            && service.plugin_path().is_none_or(|p| p.trim().is_empty())
        {
            errors.push(ConfigError::Validation {
                message: format!(
                    "services[{i}] `{name}` is dynamic and requires options.path"
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
