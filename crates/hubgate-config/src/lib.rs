// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Hubgate gateway.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides for the `[server]`
//! section, and miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use hubgate_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("listening on {}", config.server.bind_address());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, TomlSource, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{HubgateConfig, ServerConfig};
pub use validation::validate_config;

/// Load configuration from the XDG hierarchy and validate it.
///
/// On a figment failure the TOML sources are re-read so diagnostics can
/// point into the offending file.
pub fn load_and_validate() -> Result<HubgateConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            Err(diagnostic::collect_figment_errors(err, &collect_toml_sources()))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<HubgateConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = [TomlSource::new("<inline>", toml_content)];
            Err(diagnostic::collect_figment_errors(err, &sources))
        }
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<HubgateConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![TomlSource::new(absolute_display(path), content)])
                .unwrap_or_default();
            Err(diagnostic::collect_figment_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<TomlSource> {
    let mut sources = Vec::new();

    let local = Path::new(loader::LOCAL_CONFIG_FILE);
    if let Ok(content) = std::fs::read_to_string(local) {
        sources.push(TomlSource::new(absolute_display(local), content));
    }

    if let Some(path) = loader::user_config_path() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push(TomlSource::new(path.display().to_string(), content));
        }
    }

    let system_path = Path::new(loader::SYSTEM_CONFIG_PATH);
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push(TomlSource::new(system_path.display().to_string(), content));
    }

    sources
}

/// Figment records file sources by absolute path.
fn absolute_display(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
