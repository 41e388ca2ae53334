// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Container inventory adapter. Only `GET containers` is supported.

use std::sync::Arc;

use async_trait::async_trait;
use hubgate_core::{HubgateError, ServiceAdapter};

use crate::http::{base_url, build_client, send};

/// Builtin name.
pub const NAME: &str = "repocate";

#[derive(Debug, Clone)]
pub struct RepocateAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl RepocateAdapter {
    pub fn new(endpoint: &str) -> Result<Self, HubgateError> {
        Ok(Self {
            client: build_client(NAME)?,
            base_url: base_url(NAME, endpoint)?,
        })
    }

    /// Catalog factory.
    pub fn factory(endpoint: &str) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
        Ok(Arc::new(Self::new(endpoint)?))
    }

    /// The backend answers with a JSON list of container names; it is decoded
    /// and re-encoded so only that shape ever reaches the caller.
    async fn list_containers(&self) -> Result<Vec<u8>, HubgateError> {
        let body = send(
            self.client.get(format!("{}/containers", self.base_url)),
            "failed to get containers from repocate",
        )
        .await?;

        let containers: Vec<String> = serde_json::from_slice(&body).map_err(|e| {
            HubgateError::adapter_with(format!("failed to decode repocate response: {e}"), e)
        })?;

        serde_json::to_vec(&containers)
            .map_err(|e| HubgateError::Internal(format!("failed to encode containers: {e}")))
    }
}

#[async_trait]
impl ServiceAdapter for RepocateAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn handle(
        &self,
        method: &str,
        sub_path: &str,
        _body: &[u8],
    ) -> Result<Vec<u8>, HubgateError> {
        match (method, sub_path) {
            ("GET", "containers") => self.list_containers().await,
            _ => Err(HubgateError::adapter(format!(
                "unknown endpoint: {method} {sub_path}"
            ))),
        }
    }
}
