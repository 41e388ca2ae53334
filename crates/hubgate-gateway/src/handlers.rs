// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles GET /api/health, GET /metrics, GET /api/services and the
//! `/api/{service}` proxy routes.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use hubgate_core::DispatchRequest;
use serde::{Deserialize, Serialize};

use crate::dispatch;
use crate::error::{ErrorResponse, GatewayError};
use crate::server::GatewayState;

/// Response body for the health endpoints.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Response body for GET /api/services.
#[derive(Debug, Serialize)]
pub struct ServiceListResponse {
    /// Registered service names.
    pub services: Vec<String>,
}

/// Path parameters of the proxy routes. `rest` is absent on `/api/{service}`.
#[derive(Debug, Deserialize)]
pub struct ProxyPath {
    pub service: String,
    #[serde(default)]
    pub rest: String,
}

/// GET /api/health and GET /health
///
/// Reports liveness only; does not consult the registry.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// GET /metrics
///
/// Prometheus text format, or 503 when no recorder is installed.
pub async fn metrics(State(state): State<GatewayState>) -> Response {
    match &state.metrics_render {
        Some(render) => (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; version=0.0.4"),
            )],
            render(),
        )
            .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "metrics are disabled".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /api/services
pub async fn list_services(State(state): State<GatewayState>) -> Json<ServiceListResponse> {
    Json(ServiceListResponse {
        services: state.registry.list(),
    })
}

/// GET/POST/PUT/DELETE /api/{service}/{*rest}
///
/// The service is resolved before the body is read, so requests for unknown
/// services are rejected without consuming their payload. Adapter bytes are
/// written back unmodified.
pub async fn proxy(
    State(state): State<GatewayState>,
    method: Method,
    Path(ProxyPath { service, rest }): Path<ProxyPath>,
    body: Body,
) -> Result<Response, GatewayError> {
    let adapter = dispatch::resolve(&state.registry, &service)?;

    let body = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| GatewayError::BodyRead(e.to_string()))?;

    let request = DispatchRequest {
        service,
        sub_path: rest,
        method: method.as_str().to_string(),
        body: body.to_vec(),
    };

    let bytes = dispatch::invoke(adapter, request, state.adapter_timeout).await?;

    Ok((
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        bytes,
    )
        .into_response())
}
