pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;
use crate::security::access_control::access_filter_middleware;

/// Admin API routes, every one behind the access filter.
///
/// Each route also answers `OPTIONS` with `204 No Content` so a preflight
/// that the filter bypasses terminates in a status browsers accept.
pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status).options(preflight))
        .route("/admin/stats", get(get_stats).options(preflight))
        .route("/admin/config", get(get_config).options(preflight))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_filter_middleware,
        ))
        .with_state(state)
}
