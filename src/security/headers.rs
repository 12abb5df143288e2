//! Security response headers.
//!
//! # Responsibilities
//! - Add hardening headers to every response (nosniff, frame deny, no-store)
//! - Keep them out of the way of the filter's own CORS headers
//!
//! # Design Decisions
//! - `if_not_present` semantics so handlers can override deliberately
//! - Toggled as a block via `security.enable_headers`

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::schema::SecurityConfig;

/// Layer the hardening headers onto the router when enabled.
pub fn apply_security_headers(router: Router, config: &SecurityConfig) -> Router {
    if !config.enable_headers {
        return router;
    }

    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
