//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Default the filter from config, let `RUST_LOG` override it
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via config and environment

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Initialize the global tracing subscriber.
pub fn init(config: &ObservabilityConfig) {
    let default_filter = format!(
        "admin_gate={level},tower_http={level}",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
