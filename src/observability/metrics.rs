//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_requests_total{outcome}` (counter): decisions by outcome
//!   (`bypass`, `accepted`, `rejected`)
//! - `gate_login_failures_total{kind}` (counter): login failures by kind
//!   (`rejected`, `fault`)
//!
//! # Design Decisions
//! - Counters go through the `metrics` facade; recording is free-standing
//!   and works whether or not the exporter is installed
//! - Prometheus exposition on its own listener, enabled via config

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(error) => tracing::error!(%error, "failed to install metrics exporter"),
    }
}

/// Record one gate decision.
pub fn record_decision(outcome: &'static str) {
    metrics::counter!("gate_requests_total", "outcome" => outcome).increment(1);
}

/// Record one failed login attempt.
pub fn record_login_failure(kind: &'static str) {
    metrics::counter!("gate_login_failures_total", "kind" => kind).increment(1);
}
