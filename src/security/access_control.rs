//! Stateless access filter for the admin API.
//!
//! Gates every inbound request ahead of the protected handlers. The filter
//! keeps no session state: every request is treated as unauthenticated and
//! must either be a CORS preflight (bypassed) or log in with the token from
//! the `X-Access-Token` header. Anything else gets the standard 401 JSON
//! rejection, written exactly once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::http::request::RequestIdExt;
use crate::http::response::{FailureBody, APPLICATION_JSON_UTF8};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::identity::{AuthError, IdentityVerifier, StatelessCredential};

/// Header carrying the bearer credential.
pub const X_ACCESS_TOKEN: &str = "x-access-token";

/// CORS header values sent on preflight bypass. Fixed literals, not config:
/// the bypass contract is deterministic.
pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";
pub const CORS_MAX_AGE: &str = "1800";

/// The access gate. Holds only the injected verifier; safe to share across
/// any number of concurrent requests without locking.
pub struct StatelessAccessFilter {
    verifier: Arc<dyn IdentityVerifier>,
}

impl StatelessAccessFilter {
    pub fn new(verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { verifier }
    }

    /// Whether the request is already allowed to proceed.
    ///
    /// Always `false`: with no session store there is never a pre-existing
    /// authenticated session, so every request goes through
    /// [`on_access_denied`](Self::on_access_denied).
    pub fn is_access_allowed(&self, _request: &Request<Body>) -> bool {
        false
    }

    /// Denial protocol: decide whether the request may proceed anyway.
    ///
    /// Evaluated in order:
    /// 1. `OPTIONS` → annotate `response` with CORS headers, proceed
    ///    (browsers never attach credentials to preflight probes).
    /// 2. Extract the token (missing header → empty credential).
    /// 3. Attempt login; success proceeds and attaches the [`Session`] to
    ///    the request extensions, failure writes the 401 envelope into
    ///    `response` and denies.
    ///
    /// Verifier faults are absorbed here; nothing propagates to the caller.
    /// At most one body write happens per invocation.
    ///
    /// [`Session`]: crate::security::identity::Session
    pub async fn on_access_denied(
        &self,
        request: &mut Request<Body>,
        response: &mut Response<Body>,
    ) -> bool {
        if request.method() == Method::OPTIONS {
            add_cors_headers(response);
            return true;
        }

        let token = request
            .headers()
            .get(X_ACCESS_TOKEN)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let credential = StatelessCredential::new(token);

        match self.verifier.login(credential).await {
            Ok(session) => {
                tracing::debug!(
                    request_id = %request.request_id(),
                    principal = %session.principal,
                    "login accepted"
                );
                request.extensions_mut().insert(session);
                true
            }
            Err(error) => {
                match &error {
                    AuthError::Rejected { reason } => tracing::warn!(
                        request_id = %request.request_id(),
                        reason = *reason,
                        "login rejected"
                    ),
                    AuthError::Internal(fault) => tracing::error!(
                        request_id = %request.request_id(),
                        fault = %fault,
                        "identity backend fault during login"
                    ),
                }
                metrics::record_login_failure(error.kind());
                write_unauthorized(response);
                false
            }
        }
    }
}

/// Write the standard rejection into `response`: status 401, JSON content
/// type with utf-8 charset, and the failure envelope body.
///
/// Status and headers are set unconditionally, before the body is produced,
/// so the response is well-formed even if serialization fails.
pub fn write_unauthorized(response: &mut Response<Body>) {
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(APPLICATION_JSON_UTF8),
    );

    match serde_json::to_vec(&FailureBody::unauthorized()) {
        Ok(bytes) => *response.body_mut() = Body::from(bytes),
        Err(error) => tracing::error!(%error, "failed to serialize rejection body"),
    }
}

/// Set the four permissive CORS headers. Insert semantics, so the helper is
/// idempotent and safe to call on a response that already carries them.
pub fn add_cors_headers(response: &mut Response<Body>) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(CORS_ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(CORS_MAX_AGE),
    );
}

/// Gate decision counters, shared via `AppState` and served by
/// `/admin/stats`.
#[derive(Default)]
pub struct GateStats {
    preflight_bypasses: AtomicU64,
    accepted_logins: AtomicU64,
    rejections: AtomicU64,
}

#[derive(Debug, Serialize)]
pub struct StatsSnapshot {
    pub preflight_bypasses: u64,
    pub accepted_logins: u64,
    pub rejections: u64,
}

impl GateStats {
    pub fn record_bypass(&self) {
        self.preflight_bypasses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_accept(&self) {
        self.accepted_logins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            preflight_bypasses: self.preflight_bypasses.load(Ordering::Relaxed),
            accepted_logins: self.accepted_logins.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
        }
    }
}

/// Axum adapter driving the filter for every request to the protected
/// routes. Decision logic stays in the filter; this function merges staged
/// CORS headers onto bypassed responses, bumps counters and returns the
/// staged rejection when the filter denies.
pub async fn access_filter_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if state.filter.is_access_allowed(&req) {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let mut staged = Response::new(Body::empty());

    if !state.filter.on_access_denied(&mut req, &mut staged).await {
        state.stats.record_rejection();
        metrics::record_decision("rejected");
        return staged;
    }

    if method == Method::OPTIONS {
        state.stats.record_bypass();
        metrics::record_decision("bypass");
        let mut response = next.run(req).await;
        for (name, value) in staged.headers() {
            response.headers_mut().insert(name.clone(), value.clone());
        }
        return response;
    }

    state.stats.record_accept();
    metrics::record_decision("accepted");
    next.run(req).await
}
