// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prometheus metrics for the Hubgate gateway.
//!
//! Uses the metrics-rs facade with the Prometheus exporter. Metrics are
//! rendered as Prometheus text format and exposed through the gateway's
//! `/metrics` endpoint.

pub mod recording;

use std::sync::Arc;

use hubgate_core::HubgateError;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub use recording::{
    record_dispatch, record_http_request, register_metrics, set_registered_services,
};

/// Function producing the current metrics in Prometheus text format.
pub type MetricsRender = Arc<dyn Fn() -> String + Send + Sync>;

/// Installed Prometheus recorder.
pub struct PrometheusExporter {
    handle: PrometheusHandle,
}

impl PrometheusExporter {
    /// Install the Prometheus recorder globally.
    ///
    /// Only one recorder can be installed per process; a second call fails.
    pub fn install() -> Result<Self, HubgateError> {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            HubgateError::Internal(format!("failed to install Prometheus recorder: {e}"))
        })?;

        recording::register_metrics();

        tracing::info!("prometheus metrics recorder installed");

        Ok(Self { handle })
    }

    /// Render all collected metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// A cloneable render function for the gateway state.
    pub fn render_fn(&self) -> MetricsRender {
        let handle = self.handle.clone();
        Arc::new(move || handle.render())
    }
}

impl std::fmt::Debug for PrometheusExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusExporter").finish_non_exhaustive()
    }
}
