//! Metrics collection and exposition.
//!
//! # Metrics
//! - `aggregator_requests_total` (counter): requests by outcome and status
//! - `aggregator_request_duration_seconds` (histogram): end-to-end latency
//! - `aggregator_source_fetches_total` (counter): source fetches by result
//! - `aggregator_pipeline_duration_seconds` (histogram): pipeline latency
//! - `aggregator_entries` (gauge): entries in the last rendered document

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a served request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    counter!(
        "aggregator_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("aggregator_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one source fetch result.
pub fn record_source_fetch(ok: bool) {
    let result = if ok { "ok" } else { "failed" };
    counter!("aggregator_source_fetches_total", "result" => result).increment(1);
}

/// Record a completed pipeline run.
pub fn record_pipeline(entries: usize, start: Instant) {
    gauge!("aggregator_entries").set(entries as f64);
    histogram!("aggregator_pipeline_duration_seconds").record(start.elapsed().as_secs_f64());
}
