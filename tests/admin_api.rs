//! Integration tests for the protected admin endpoints.

use std::time::Duration;

use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn stats_counters_track_gate_decisions() {
    let (addr, shutdown) = common::spawn_gate(common::gate_config("ops", "secret-1")).await;
    let client = common::client();

    // One bypass, one rejection, one accepted request.
    client
        .request(reqwest::Method::OPTIONS, format!("http://{}/admin/stats", addr))
        .send()
        .await
        .unwrap();
    client
        .get(format!("http://{}/admin/status", addr))
        .send()
        .await
        .unwrap();
    client
        .get(format!("http://{}/admin/status", addr))
        .header("X-Access-Token", "secret-1")
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("http://{}/admin/stats", addr))
        .header("X-Access-Token", "secret-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let stats: serde_json::Value = res.json().await.unwrap();
    assert_eq!(stats["preflight_bypasses"], 1);
    assert_eq!(stats["rejections"], 1);
    // The stats request itself was the second accepted login.
    assert_eq!(stats["accepted_logins"], 2);

    shutdown.trigger();
}

#[tokio::test]
async fn config_endpoint_never_echoes_token_material() {
    let (addr, shutdown) =
        common::spawn_gate(common::gate_config("ops", "super-secret-token")).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/admin/config", addr))
        .header("X-Access-Token", "super-secret-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let text = res.text().await.unwrap();
    assert!(text.contains("ops"));
    assert!(!text.contains("super-secret-token"));

    let config: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(config["configured_keys"], 1);
    assert_eq!(config["principals"][0], "ops");

    shutdown.trigger();
}

#[tokio::test]
async fn each_key_authenticates_as_its_own_principal() {
    let mut config = common::gate_config("ops", "secret-1");
    config
        .auth
        .keys
        .push(admin_gate::config::schema::ApiKeyConfig {
            principal: "ci".to_string(),
            token: "secret-2".to_string(),
        });
    let (addr, shutdown) = common::spawn_gate(config).await;
    let client = common::client();

    for (token, principal) in [("secret-1", "ops"), ("secret-2", "ci")] {
        let res = client
            .get(format!("http://{}/admin/status", addr))
            .header("X-Access-Token", token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["principal"], principal);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn connection_cap_queues_requests_instead_of_failing_them() {
    let mut config = common::gate_config("ops", "secret-1");
    config.listener.max_connections = 2;
    let (addr, shutdown) = common::spawn_gate(config).await;
    let client = common::client();

    // Well past the cap; the semaphore queues the overflow and every
    // request still completes.
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .get(format!("http://{}/admin/status", addr))
                .header("X-Access-Token", "secret-1")
                .send()
                .await
                .unwrap()
                .status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn gate_stops_accepting_after_shutdown() {
    let (addr, shutdown) = common::spawn_gate(common::gate_config("ops", "secret-1")).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    shutdown.trigger();

    let mut refused = false;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .is_err()
        {
            refused = true;
            break;
        }
    }
    assert!(refused, "gate kept accepting connections after shutdown");
}

#[tokio::test]
async fn locked_gate_rejects_every_token() {
    // Default config carries no keys at all.
    let (addr, shutdown) = common::spawn_gate(admin_gate::GateConfig::default()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/admin/status", addr))
        .header("X-Access-Token", "anything")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    shutdown.trigger();
}
