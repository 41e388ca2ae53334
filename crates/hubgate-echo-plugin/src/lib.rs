// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference dynamic service.
//!
//! Build with `cargo build -p hubgate-echo-plugin` and declare it as:
//!
//! ```toml
//! [[services]]
//! name = "echo-plugin"
//! kind = "dynamic"
//! options = { path = "target/debug/libhubgate_echo_plugin.so" }
//! ```
//!
//! Every request body is returned unchanged, except `GET info`, which
//! describes the plugin.

use async_trait::async_trait;
use hubgate_core::{HubgateError, ServiceAdapter};

pub struct EchoPlugin {
    endpoint: String,
}

#[async_trait]
impl ServiceAdapter for EchoPlugin {
    fn name(&self) -> &str {
        "echo-plugin"
    }

    async fn handle(
        &self,
        method: &str,
        sub_path: &str,
        body: &[u8],
    ) -> Result<Vec<u8>, HubgateError> {
        if method == "GET" && sub_path == "info" {
            let info = serde_json::json!({
                "plugin": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "endpoint": self.endpoint,
            });
            return serde_json::to_vec(&info)
                .map_err(|e| HubgateError::adapter_with("failed to encode plugin info", e));
        }
        Ok(body.to_vec())
    }
}

/// Plugin factory exported through the declaration static.
pub fn create(endpoint: &str) -> Result<Box<dyn ServiceAdapter>, HubgateError> {
    Ok(Box::new(EchoPlugin {
        endpoint: endpoint.to_string(),
    }))
}

hubgate_core::export_service!(create);
