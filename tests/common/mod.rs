//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use admin_gate::config::schema::{ApiKeyConfig, GateConfig};
use admin_gate::http::GateServer;
use admin_gate::lifecycle::Shutdown;
use admin_gate::security::identity::IdentityVerifier;

/// Config with a single accepted credential.
pub fn gate_config(principal: &str, token: &str) -> GateConfig {
    let mut config = GateConfig::default();
    config.auth.keys.push(ApiKeyConfig {
        principal: principal.to_string(),
        token: token.to_string(),
    });
    config
}

/// Spawn a gate on an ephemeral port; returns its address and the shutdown
/// handle that tears it down.
pub async fn spawn_gate(config: GateConfig) -> (SocketAddr, Shutdown) {
    let server = GateServer::new(config);
    spawn(server).await
}

/// Spawn a gate with an injected verifier (fault injection).
#[allow(dead_code)]
pub async fn spawn_gate_with_verifier(
    config: GateConfig,
    verifier: Arc<dyn IdentityVerifier>,
) -> (SocketAddr, Shutdown) {
    let server = GateServer::with_verifier(config, verifier);
    spawn(server).await
}

async fn spawn(server: GateServer) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let signal = shutdown.signal();

    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (addr, shutdown)
}

/// Non-pooled client so every request opens a fresh connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
