//! Metrics collection and exposition.
//!
//! # Metrics
//! - `xlsx2json_requests_total` (counter): conversions by outcome
//! - `xlsx2json_request_duration_seconds` (histogram): end-to-end latency
//! - `xlsx2json_rows_total` (counter): rows returned to callers
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished conversion.
pub fn record_conversion(outcome: &'static str, started: Instant) {
    metrics::counter!("xlsx2json_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("xlsx2json_request_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

pub fn record_rows(count: usize) {
    metrics::counter!("xlsx2json_rows_total").increment(count as u64);
}
