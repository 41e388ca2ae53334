// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any recorder can collect these metrics.
//! With no recorder installed every helper is a no-op.

use metrics::{describe_counter, describe_gauge, describe_histogram};

/// Register all Hubgate metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "hubgate_http_requests_total",
        "HTTP requests handled, by method and status"
    );
    describe_histogram!(
        "hubgate_http_request_duration_seconds",
        "Time from request arrival to response, in seconds"
    );
    describe_counter!(
        "hubgate_dispatch_total",
        "Adapter calls by service and outcome"
    );
    describe_histogram!(
        "hubgate_adapter_latency_seconds",
        "Adapter call latency in seconds"
    );
    describe_gauge!(
        "hubgate_registered_services",
        "Services currently in the registry"
    );
}

/// Record one completed HTTP request.
///
/// The path is not a label; it is unbounded.
pub fn record_http_request(method: &str, status: u16, seconds: f64) {
    metrics::counter!(
        "hubgate_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("hubgate_http_request_duration_seconds", "method" => method.to_string())
        .record(seconds);
}

/// Record one adapter call against a registered service.
pub fn record_dispatch(service: &str, outcome: &'static str, seconds: f64) {
    metrics::counter!(
        "hubgate_dispatch_total",
        "service" => service.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("hubgate_adapter_latency_seconds", "service" => service.to_string())
        .record(seconds);
}

/// Set the number of registered services.
pub fn set_registered_services(count: usize) {
    metrics::gauge!("hubgate_registered_services").set(count as f64);
}
