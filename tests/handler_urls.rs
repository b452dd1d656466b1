mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use shortly::infrastructure::persistence::InMemoryMappingRepository;
use shortly::utils::code_generator::is_valid_code;
use std::sync::Arc;

#[tokio::test]
async fn test_create_url_success() {
    let (server, repository) = common::create_test_server();

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let code = body["code"].as_str().unwrap();
    assert!(is_valid_code(code));
    assert_eq!(body["short_url"], format!("http://sho.rt/{code}"));

    let location = response.header("location");
    assert_eq!(location, format!("http://sho.rt/{code}").as_str());

    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_create_url_is_idempotent() {
    let (server, repository) = common::create_test_server();

    let first = common::shorten(&server, "https://example.com/page").await;
    let second = common::shorten(&server, "  HTTPS://EXAMPLE.COM:443/page ").await;

    assert_eq!(first, second);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_create_url_distinct_urls_get_distinct_codes() {
    let (server, repository) = common::create_test_server();

    let a = common::shorten(&server, "https://example.com/a").await;
    let b = common::shorten(&server, "https://example.com/b").await;

    assert_ne!(a, b);
    assert_eq!(repository.len().await, 2);
}

#[tokio::test]
async fn test_create_url_uses_forwarded_proto() {
    let (server, _) = common::create_test_server();

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", common::TEST_HOST)
        .add_header("X-Forwarded-Proto", "https")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let short_url = response.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(short_url.starts_with("https://sho.rt/"));
}

#[tokio::test]
async fn test_create_url_with_base_url() {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let state = common::create_test_state(repository, Some("https://go.example.org/"));
    let server = common::server_for(state);

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", "internal:8080")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let code = body["code"].as_str().unwrap();
    assert_eq!(body["short_url"], format!("https://go.example.org/{code}"));
}

#[tokio::test]
async fn test_create_url_invalid_scheme() {
    let (server, repository) = common::create_test_server();

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(
        body["error"]["details"]["reason"]
            .as_str()
            .unwrap()
            .contains("ftp")
    );

    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_create_url_malformed() {
    let (server, _) = common::create_test_server();

    for url in [
        "not a url",
        "example.com",
        "https://",
        "javascript:alert(1)",
        "http:example.com",
        "https:///example.com",
    ] {
        let response = server
            .post("/api/v1/urls")
            .add_header("Host", common::TEST_HOST)
            .json(&json!({ "url": url }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_create_url_too_long() {
    let (server, _) = common::create_test_server();

    let url = format!("https://example.com/{}", "a".repeat(2048));

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "url": url }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_url_missing_field() {
    let (server, _) = common::create_test_server();

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({}))
        .await;

    response.assert_status_bad_request();

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_url_invalid_json() {
    let (server, _) = common::create_test_server();

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", common::TEST_HOST)
        .add_header("Content-Type", "application/json")
        .bytes("{\"url\":".into())
        .await;

    response.assert_status_bad_request();

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_url_storage_failure_is_internal() {
    let state = common::create_test_state(Arc::new(common::UnavailableRepository), None);
    let server = common::server_for(state);

    let response = server
        .post("/api/v1/urls")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "internal_error");
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_get_url_success() {
    let (server, _) = common::create_test_server();

    let code = common::shorten(&server, "https://example.com/target?q=1").await;

    let response = server.get(&format!("/api/v1/urls/{code}")).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["url"],
        "https://example.com/target?q=1"
    );
}

#[tokio::test]
async fn test_get_url_not_found() {
    let (server, _) = common::create_test_server();

    let response = server.get("/api/v1/urls/AAAAAAAAAA").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_get_url_malformed_code() {
    let state = common::create_test_state(Arc::new(common::UnavailableRepository), None);
    let server = common::server_for(state);

    // Malformed codes never reach the (failing) store.
    for code in ["short", "AAAAAAAAAAA", "AAAA-AAAAA"] {
        let response = server.get(&format!("/api/v1/urls/{code}")).await;
        response.assert_status_not_found();
    }
}
