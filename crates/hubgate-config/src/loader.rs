// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hubgate.toml` > `~/.config/hubgate/hubgate.toml` > `/etc/hubgate/hubgate.toml`
//! with environment variable overrides via `HUBGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HubgateConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/hubgate/hubgate.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "hubgate.toml";

/// Path of the per-user configuration file, if a config dir is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hubgate").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hubgate/hubgate.toml` (system-wide)
/// 3. `~/.config/hubgate/hubgate.toml` (user XDG config)
/// 4. `./hubgate.toml` (local directory)
/// 5. `HUBGATE_*` environment variables
pub fn load_config() -> Result<HubgateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<HubgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HubgateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the XDG lookup, the file must exist.
pub fn load_config_from_path(path: &Path) -> Result<HubgateConfig, figment::Error> {
    if !path.is_file() {
        return Err(figment::Error::from(format!(
            "configuration file {} does not exist",
            path.display()
        )));
    }

    Figment::new()
        .merge(Serialized::defaults(HubgateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HubgateConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `HUBGATE_SERVER_<KEY>` to `server.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// keys survive: `HUBGATE_SERVER_MAX_BODY_BYTES` maps to
/// `server.max_body_bytes`, not `server.max.body.bytes`. Services are only
/// declared in files, so other `HUBGATE_*` variables are ignored.
fn env_provider() -> Env {
    Env::prefixed("HUBGATE_")
        .filter(|key| key.as_str().to_ascii_lowercase().starts_with("server_"))
        .map(|key| {
            key.as_str()
                .to_ascii_lowercase()
                .replacen("server_", "server.", 1)
                .into()
        })
}
