// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch of one request to one registered adapter.
//!
//! Dispatch is split into [`resolve`] and [`invoke`] so the HTTP handler can
//! reject unknown services before it reads the request body.

use std::sync::Arc;
use std::time::{Duration, Instant};

use hubgate_core::{DispatchRequest, HubgateError, ServiceAdapter};
use hubgate_registry::ServiceRegistry;
use tracing::{debug, warn};

use crate::error::GatewayError;

/// Look up the adapter registered under `service`.
pub fn resolve(
    registry: &ServiceRegistry,
    service: &str,
) -> Result<Arc<dyn ServiceAdapter>, GatewayError> {
    registry
        .get(service)
        .ok_or_else(|| GatewayError::ServiceNotFound(service.to_string()))
}

/// Run `request` against `adapter`, optionally bounded by `timeout`.
///
/// The call runs on its own task: dropping the inbound connection does not
/// cancel it, and a panicking adapter surfaces as an adapter error. When the
/// bound expires the task is aborted. Every call is recorded in the dispatch
/// metrics under its service name.
pub async fn invoke(
    adapter: Arc<dyn ServiceAdapter>,
    request: DispatchRequest,
    timeout: Option<Duration>,
) -> Result<Vec<u8>, GatewayError> {
    let service = request.service.clone();
    let start = Instant::now();
    let result = run(adapter, request, timeout).await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    hubgate_prometheus::record_dispatch(&service, outcome, start.elapsed().as_secs_f64());
    result
}

async fn run(
    adapter: Arc<dyn ServiceAdapter>,
    request: DispatchRequest,
    timeout: Option<Duration>,
) -> Result<Vec<u8>, GatewayError> {
    let DispatchRequest {
        service,
        sub_path,
        method,
        body,
    } = request;

    debug!(
        service = %service,
        method = %method,
        sub_path = %sub_path,
        body_len = body.len(),
        "dispatching to adapter"
    );

    let mut task =
        tokio::spawn(async move { adapter.handle(&method, &sub_path, &body).await });

    let joined = match timeout {
        None => (&mut task).await,
        Some(duration) => match tokio::time::timeout(duration, &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                task.abort();
                warn!(service = %service, timeout_secs = duration.as_secs(), "adapter call timed out");
                return Err(GatewayError::Timeout { service, duration });
            }
        },
    };

    match joined {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => {
            warn!(service = %service, error = %e, "adapter returned an error");
            Err(GatewayError::Adapter(e))
        }
        Err(join_err) => {
            warn!(service = %service, error = %join_err, "adapter task failed");
            Err(GatewayError::Adapter(HubgateError::Internal(format!(
                "service `{service}` failed: {}",
                if join_err.is_panic() { "adapter panicked" } else { "adapter task cancelled" }
            ))))
        }
    }
}

/// Resolve and invoke in one step, for callers that already hold the body.
pub async fn dispatch(
    registry: &ServiceRegistry,
    request: DispatchRequest,
    timeout: Option<Duration>,
) -> Result<Vec<u8>, GatewayError> {
    let adapter = resolve(registry, &request.service)?;
    invoke(adapter, request, timeout).await
}
