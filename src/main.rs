//! Admin Gate (v1)
//!
//! A stateless access-control gate for an administrative HTTP API, built
//! with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌─────────────────────────────────────────────┐
//!                     │                 ADMIN GATE                  │
//!                     │                                             │
//!   Client Request    │  ┌─────────┐   ┌──────────────────────────┐ │
//!   ──────────────────┼─▶│  http   │──▶│ security::access_control │ │
//!                     │  │ server  │   │  bypass / login / reject │ │
//!                     │  └─────────┘   └────────────┬─────────────┘ │
//!                     │                             │               │
//!                     │                             ▼               │
//!   Client Response   │  ┌─────────┐        ┌──────────────┐        │
//!   ◀─────────────────┼──│response │◀───────│    admin     │        │
//!                     │  │envelope │        │   handlers   │        │
//!                     │  └─────────┘        └──────────────┘        │
//!                     │                                             │
//!                     │  ┌───────────────────────────────────────┐  │
//!                     │  │         Cross-Cutting Concerns        │  │
//!                     │  │  config │ observability │ lifecycle   │  │
//!                     │  └───────────────────────────────────────┘  │
//!                     └─────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod admin;
pub mod config;
pub mod http;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

use std::path::Path;

use tokio::net::TcpListener;

use crate::config::GateConfig;
use crate::http::GateServer;
use crate::lifecycle::Shutdown;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration: first CLI argument is the config path, defaults
    // otherwise (gate boots locked without keys).
    let config = match std::env::args().nth(1) {
        Some(path) => config::loader::load_config(Path::new(&path))?,
        None => GateConfig::default(),
    };

    observability::logging::init(&config.observability);

    tracing::info!("admin-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        api_keys = config.auth.keys.len(),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics server
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            crate::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run the server
    let shutdown = Shutdown::new();
    let server = GateServer::new(config);
    server.run(listener, shutdown.signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
