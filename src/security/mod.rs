//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_control.rs (stateless filter: bypass / login / reject)
//!     → identity.rs (verifier decides whether the credential logs in)
//!     → headers.rs (hardening headers on every response)
//!     → Pass to admin handlers
//! ```
//!
//! # Design Decisions
//! - The filter keeps no state between requests; every call re-authenticates
//! - Fail closed: a request proceeds only via preflight bypass or login
//! - The identity verifier is injected, never resolved from ambient context

pub mod access_control;
pub mod headers;
pub mod identity;

pub use access_control::{GateStats, StatelessAccessFilter};
pub use identity::{AuthError, IdentityVerifier, Session, StatelessCredential};
