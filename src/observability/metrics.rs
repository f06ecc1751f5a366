//! Metrics collection and exposition.
//!
//! # Metrics
//! - `getjson_requests_total` (counter): requests by method, status
//! - `getjson_request_duration_seconds` (histogram): latency distribution
//! - `getjson_route_misses_total` (counter): requests matching no template
//!
//! # Design Decisions
//! - Exporter is optional; without it the macros record into a no-op recorder
//! - Labels are low-cardinality (no paths)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "getjson_requests_total";
pub const REQUEST_DURATION: &str = "getjson_request_duration_seconds";
pub const ROUTE_MISSES_TOTAL: &str = "getjson_route_misses_total";

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    metrics::counter!(REQUESTS_TOTAL, "method" => method.clone(), "status" => status.clone())
        .increment(1);
    metrics::histogram!(REQUEST_DURATION, "method" => method, "status" => status)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request path that matched no template.
pub fn record_route_miss() {
    metrics::counter!(ROUTE_MISSES_TOTAL).increment(1);
}
