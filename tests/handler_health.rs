mod common;

use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _) = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert!(json["checks"]["storage"]["latency_ms"].is_u64());
    assert!(json["checks"]["storage"].get("message").is_none());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let state = common::create_test_state(Arc::new(common::UnavailableRepository), None);
    let server = common::server_for(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "error");
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let state = common::create_test_state(Arc::new(common::UnavailableRepository), None);
    let server = common::server_for(state);

    let response = server.get("/healthz").await;

    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test]
async fn test_readiness_endpoint_ready() {
    let (server, _) = common::create_test_server();

    let response = server.get("/readyz").await;

    response.assert_status_ok();
    response.assert_text("ready");
}

#[tokio::test]
async fn test_readiness_endpoint_storage_down() {
    let state = common::create_test_state(Arc::new(common::UnavailableRepository), None);
    let server = common::server_for(state);

    let response = server.get("/readyz").await;

    assert_eq!(response.status_code(), 503);
    response.assert_text("not ready");
}
