// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process gateway harness.
//!
//! `TestGateway` owns a registry and the router built over it. Requests are
//! driven through `tower::ServiceExt::oneshot`, so no socket is opened.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::util::ServiceExt;

use hubgate_core::{HubgateError, ServiceAdapter};
use hubgate_gateway::{build_router, GatewayState};
use hubgate_registry::ServiceRegistry;

/// Builder for [`TestGateway`].
pub struct TestGatewayBuilder {
    adapters: Vec<(String, Arc<dyn ServiceAdapter>)>,
    max_body_bytes: Option<usize>,
    adapter_timeout: Option<Duration>,
    cors_permissive: bool,
}

impl TestGatewayBuilder {
    fn new() -> Self {
        Self {
            adapters: Vec::new(),
            max_body_bytes: None,
            adapter_timeout: None,
            cors_permissive: true,
        }
    }

    /// Register `adapter` under `name` before the router is built.
    pub fn with_adapter(mut self, name: &str, adapter: Arc<dyn ServiceAdapter>) -> Self {
        self.adapters.push((name.to_string(), adapter));
        self
    }

    /// Override the request body limit.
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    /// Bound every adapter call.
    pub fn with_adapter_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = Some(timeout);
        self
    }

    /// Toggle the permissive CORS layer.
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors_permissive = enabled;
        self
    }

    /// Build the harness.
    pub fn build(self) -> TestGateway {
        let registry = Arc::new(ServiceRegistry::new());
        for (name, adapter) in self.adapters {
            registry.register(name, adapter);
        }

        let mut state = GatewayState::new(registry.clone());
        if let Some(limit) = self.max_body_bytes {
            state.max_body_bytes = limit;
        }
        state.adapter_timeout = self.adapter_timeout;

        TestGateway {
            router: build_router(state, self.cors_permissive),
            registry,
        }
    }
}

/// A fully buffered gateway response.
#[derive(Debug, Clone)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The `error` field of a JSON error body, if present.
    pub fn error_message(&self) -> Option<String> {
        self.json()
            .ok()?
            .get("error")?
            .as_str()
            .map(str::to_string)
    }
}

/// A gateway router plus the registry behind it.
pub struct TestGateway {
    registry: Arc<ServiceRegistry>,
    router: Router,
}

impl TestGateway {
    /// Start configuring a harness.
    pub fn builder() -> TestGatewayBuilder {
        TestGatewayBuilder::new()
    }

    /// The live registry; adapters registered here are visible to later requests.
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// Send one request and buffer the response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: impl Into<Vec<u8>>,
    ) -> Result<TestResponse, HubgateError> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.into()))
            .map_err(|e| HubgateError::Internal(format!("invalid test request: {e}")))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| HubgateError::Internal(format!("failed to read response body: {e}")))?;

        Ok(TestResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }

    /// Shorthand for a bodiless GET.
    pub async fn get(&self, uri: &str) -> Result<TestResponse, HubgateError> {
        self.request("GET", uri, Vec::new()).await
    }
}
