//! Admin Gate Library
//!
//! A stateless access-control gate for an administrative HTTP API.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::GateConfig;
pub use http::GateServer;
pub use lifecycle::Shutdown;
