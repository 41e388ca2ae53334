// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP plumbing for the builtin adapters.

use std::time::Duration;

use hubgate_core::HubgateError;
use tracing::debug;

/// Per-request timeout applied by every builtin adapter client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the client used by one adapter instance.
pub(crate) fn build_client(service: &str) -> Result<reqwest::Client, HubgateError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| HubgateError::adapter_with(format!("{service}: failed to build HTTP client"), e))
}

/// Validate and normalize a configured base address.
pub(crate) fn base_url(service: &str, endpoint: &str) -> Result<String, HubgateError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(HubgateError::Config(format!(
            "{service} requires an endpoint"
        )));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(HubgateError::Config(format!(
            "{service} endpoint `{trimmed}` must be an http(s) URL"
        )));
    }
    Ok(trimmed.to_string())
}

/// Send `request` and return the response body.
///
/// `context` prefixes transport failures, e.g. `failed to list buckets`.
/// Non-success statuses are reported with the backend's body.
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    context: &str,
) -> Result<Vec<u8>, HubgateError> {
    let response = request
        .send()
        .await
        .map_err(|e| HubgateError::adapter_with(format!("{context}: {e}"), e))?;

    let status = response.status();
    debug!(status = %status, context, "backend response received");

    let body = response
        .bytes()
        .await
        .map_err(|e| HubgateError::adapter_with(format!("{context}: {e}"), e))?;

    if !status.is_success() {
        return Err(HubgateError::adapter(format!(
            "{context}: backend returned {status}: {}",
            String::from_utf8_lossy(&body)
        )));
    }

    Ok(body.to_vec())
}

/// Reject bodies that are not JSON; valid bodies pass through untouched.
pub(crate) fn ensure_json(body: Vec<u8>, context: &str) -> Result<Vec<u8>, HubgateError> {
    serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(|e| HubgateError::adapter_with(format!("{context}: invalid JSON response"), e))?;
    Ok(body)
}
