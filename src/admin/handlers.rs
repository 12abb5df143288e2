use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::security::access_control::StatsSnapshot;
use crate::security::identity::Session;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub principal: String,
}

pub async fn get_status(Extension(session): Extension<Session>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        principal: session.principal,
    })
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}

/// Sanitized configuration summary. Token material never leaves the server;
/// only the principals and counts are echoed.
pub async fn get_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = &state.config;
    let principals: Vec<&str> = config
        .auth
        .keys
        .iter()
        .map(|k| k.principal.as_str())
        .collect();

    Json(serde_json::json!({
        "bind_address": config.listener.bind_address,
        "max_connections": config.listener.max_connections,
        "request_timeout_secs": config.timeouts.request_secs,
        "configured_keys": principals.len(),
        "principals": principals,
        "security": {
            "enable_headers": config.security.enable_headers,
            "max_body_size": config.security.max_body_size,
        },
    }))
}

/// Terminal status for a bypassed CORS preflight.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
