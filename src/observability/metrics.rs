//! Metrics collection and exposition.
//!
//! # Metrics
//! - `routing_match_total` (counter): match attempts by `outcome`
//!   (`matched`, `no_match`, `error`)
//! - `routing_resolve_total` (counter): resolve attempts by `outcome`
//!   (`resolved`, `cannot_resolve`, `error`)
//! - `routing_table_entries` (gauge): size of the URI path forward table
//! - `routing_config_reloads_total` (counter): reloads by `result`
//! - `routing_http_requests_total` (counter): HTTP requests by `endpoint`, `status`
//!
//! # Design Decisions
//! - Labels are small fixed sets, never paths or addresses
//! - The exporter is optional; the facade is a no-op until installed

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_match(outcome: &'static str) {
    metrics::counter!("routing_match_total", "outcome" => outcome).increment(1);
}

pub fn record_resolve(outcome: &'static str) {
    metrics::counter!("routing_resolve_total", "outcome" => outcome).increment(1);
}

pub fn record_table_entries(entries: usize) {
    metrics::gauge!("routing_table_entries").set(entries as f64);
}

pub fn record_reload(result: &'static str) {
    metrics::counter!("routing_config_reloads_total", "result" => result).increment(1);
}

pub fn record_http_request(endpoint: &'static str, status: u16) {
    metrics::counter!(
        "routing_http_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}
