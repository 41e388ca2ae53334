// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request logging and HTTP metrics.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderValue, header::HeaderName},
    middleware::Next,
    response::Response,
};
use tracing::{info, Instrument};

/// Response header carrying the id assigned to each request.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Assign a request id, run the request inside a span carrying it, and log
/// method, path, status and elapsed time once the response is ready. The
/// same request is counted in the HTTP metrics.
pub async fn request_log(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status,
        elapsed_ms = elapsed.as_millis() as u64,
        "request completed"
    );
    hubgate_prometheus::record_http_request(method.as_str(), status, elapsed.as_secs_f64());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
