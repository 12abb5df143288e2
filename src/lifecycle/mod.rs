//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans the shutdown signal out to every task
//! - Tests trigger it directly instead of sending process signals

pub mod shutdown;

pub use shutdown::{Shutdown, ShutdownSignal};
