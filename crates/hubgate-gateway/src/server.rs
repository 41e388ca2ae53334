// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, on, MethodFilter},
    Router,
};
use hubgate_core::HubgateError;
use hubgate_prometheus::MetricsRender;
use hubgate_registry::ServiceRegistry;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::middleware::request_log;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Live adapters, shared with the loader.
    pub registry: Arc<ServiceRegistry>,
    /// Largest request body read before dispatch.
    pub max_body_bytes: usize,
    /// Upper bound on one adapter call; `None` is unbounded.
    pub adapter_timeout: Option<Duration>,
    /// Prometheus render function for /metrics; `None` when metrics are off.
    pub metrics_render: Option<MetricsRender>,
}

impl GatewayState {
    /// State with the default 10 MiB body limit, no adapter timeout and
    /// metrics disabled.
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self {
            registry,
            max_body_bytes: 10 * 1024 * 1024,
            adapter_timeout: None,
            metrics_render: None,
        }
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("adapter_timeout", &self.adapter_timeout)
            .field("metrics_render", &self.metrics_render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Gateway listener configuration (mirrors `ServerConfig` from hubgate-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Attach a permissive CORS layer.
    pub cors_permissive: bool,
    /// How long in-flight requests may run after shutdown is requested.
    pub shutdown_grace: Duration,
}

/// Build the gateway router.
///
/// Routes:
/// - GET /health, GET /api/health
/// - GET /metrics
/// - GET /api/services
/// - GET/POST/PUT/DELETE /api/{service}, /api/{service}/ and /api/{service}/{*rest}
pub fn build_router(state: GatewayState, cors_permissive: bool) -> Router {
    let proxy_methods = MethodFilter::GET
        .or(MethodFilter::POST)
        .or(MethodFilter::PUT)
        .or(MethodFilter::DELETE);

    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/services", get(handlers::list_services));

    let proxy_routes = Router::new()
        .route("/api/{service}", on(proxy_methods, handlers::proxy))
        // The catch-all never matches an empty remainder.
        .route("/api/{service}/", on(proxy_methods, handlers::proxy))
        .route("/api/{service}/{*rest}", on(proxy_methods, handlers::proxy));

    let app = Router::new()
        .merge(public_routes)
        .merge(proxy_routes)
        .layer(axum_middleware::from_fn(request_log))
        .with_state(state);

    if cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Start the gateway HTTP server and serve until `shutdown` is cancelled.
///
/// After cancellation, in-flight requests get `config.shutdown_grace` to
/// finish before the server stops waiting for them.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), HubgateError> {
    let app = build_router(state, config.cors_permissive);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HubgateError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(addr = %addr, "gateway listening");

    serve(listener, app, shutdown, config.shutdown_grace).await
}

/// Serve `app` on an already bound listener.
pub async fn serve(
    listener: tokio::net::TcpListener,
    app: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> Result<(), HubgateError> {
    let signal = shutdown.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { signal.cancelled().await });

    let mut server = std::pin::pin!(server.into_future());

    tokio::select! {
        result = &mut server => {
            result.map_err(|e| HubgateError::Internal(format!("gateway server error: {e}")))?;
        }
        _ = async {
            shutdown.cancelled().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_secs = grace.as_secs(), "shutdown grace period elapsed, dropping in-flight requests");
        }
    }

    tracing::info!("gateway stopped");
    Ok(())
}
