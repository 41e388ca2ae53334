// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-level failures and their HTTP mapping.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hubgate_core::HubgateError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Why a proxied request could not produce an adapter response.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No adapter is registered under the requested name.
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    /// The inbound body could not be read in full.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The adapter returned an error. Displays the adapter's own message.
    #[error("{0}")]
    Adapter(#[source] HubgateError),

    /// The adapter did not finish within the configured bound.
    #[error("service `{service}` timed out after {}s", duration.as_secs())]
    Timeout {
        service: String,
        duration: Duration,
    },
}

impl GatewayError {
    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::ServiceNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::BodyRead(_) | GatewayError::Adapter(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Outcome label used in dispatch metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            GatewayError::ServiceNotFound(_) => "not_found",
            GatewayError::BodyRead(_) => "body_read",
            GatewayError::Adapter(_) => "error",
            GatewayError::Timeout { .. } => "timeout",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
