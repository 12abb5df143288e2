//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: open `/health`, gated `/admin/*`
//! - Wire up middleware (timeout, request ID, tracing, body limit, headers)
//! - Bind to the listener and serve with graceful shutdown
//! - Assemble the filter with its injected identity verifier

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::setup_admin_router;
use crate::config::schema::GateConfig;
use crate::http::request::RequestIdLayer;
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::security::access_control::{GateStats, StatelessAccessFilter};
use crate::security::headers::apply_security_headers;
use crate::security::identity::{IdentityVerifier, StaticTokenVerifier};

/// Application state injected into the middleware and handlers.
#[derive(Clone)]
pub struct AppState {
    pub filter: Arc<StatelessAccessFilter>,
    pub stats: Arc<GateStats>,
    pub config: Arc<GateConfig>,
}

/// HTTP server hosting the gated admin API.
pub struct GateServer {
    router: Router,
    config: GateConfig,
}

impl GateServer {
    /// Create a server whose gate checks tokens against the config keys.
    pub fn new(config: GateConfig) -> Self {
        let verifier = Arc::new(StaticTokenVerifier::from_config(&config.auth));
        Self::with_verifier(config, verifier)
    }

    /// Create a server with an explicit identity verifier. Used by tests to
    /// inject rejecting or faulting verifiers.
    pub fn with_verifier(config: GateConfig, verifier: Arc<dyn IdentityVerifier>) -> Self {
        let state = AppState {
            filter: Arc::new(StatelessAccessFilter::new(verifier)),
            stats: Arc::new(GateStats::default()),
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers. `/health` stays
    /// outside the gate so liveness probes need no credential.
    fn build_router(config: &GateConfig, state: AppState) -> Router {
        // One semaphore shared across connections; requests past the cap
        // wait for a slot instead of being rejected.
        let router = Router::new()
            .route("/health", get(health))
            .merge(setup_admin_router(state))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ));

        apply_security_headers(router, &config.security)
    }

    /// Run the server until ctrl-c or the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "admin gate starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => {
                        if result.is_ok() {
                            tracing::info!("ctrl-c received");
                        }
                    }
                    _ = shutdown.wait() => {
                        tracing::info!("shutdown signal received");
                    }
                }
            })
            .await?;

        tracing::info!("admin gate stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

/// Liveness probe, deliberately outside the access gate.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
