//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack, graceful shutdown)
//!     → request.rs (stamp request ID)
//!     → security::access_control (gate decision)
//!     → admin handlers
//!     → response.rs (failure envelope shape)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::GateServer;
