//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Filter and middleware produce:
//!     → logging.rs (structured log events, request-id correlated)
//!     → metrics.rs (gate decision and login-failure counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line the gate emits
//! - Metrics are cheap (atomic increments behind the `metrics` facade)
//! - The exporter is optional; counters are recorded either way

pub mod logging;
pub mod metrics;
