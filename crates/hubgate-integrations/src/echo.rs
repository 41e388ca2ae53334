// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic adapter that returns every request body unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use hubgate_core::{HubgateError, ServiceAdapter};

/// Builtin name.
pub const NAME: &str = "echo";

#[derive(Debug, Clone, Default)]
pub struct EchoAdapter;

impl EchoAdapter {
    /// Catalog factory. The endpoint is ignored.
    pub fn factory(_endpoint: &str) -> Result<Arc<dyn ServiceAdapter>, HubgateError> {
        Ok(Arc::new(EchoAdapter))
    }
}

#[async_trait]
impl ServiceAdapter for EchoAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn handle(
        &self,
        _method: &str,
        _sub_path: &str,
        body: &[u8],
    ) -> Result<Vec<u8>, HubgateError> {
        Ok(body.to_vec())
    }
}
