//! Metrics collection and exposition.
//!
//! # Metrics
//! - `htmx_requests_total` (counter): requests seen by the middleware,
//!   labelled `participating="true|false"`
//!
//! Without an installed recorder the macros are no-ops.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "htmx_requests_total";

/// Count one request passing through the HX middleware.
pub fn record_request(participating: bool) {
    let label = if participating { "true" } else { "false" };
    metrics::counter!(REQUESTS_TOTAL, "participating" => label).increment(1);
}

/// Install the Prometheus recorder with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            metrics::describe_counter!(REQUESTS_TOTAL, "Requests seen by the HX middleware");
            tracing::info!(address = %addr, "Metrics endpoint listening");
        }
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}
