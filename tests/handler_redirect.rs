mod common;

use std::sync::Arc;

#[tokio::test]
async fn test_redirect_success() {
    let (server, _) = common::create_test_server();

    let code = common::shorten(&server, "https://example.com/target").await;

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_keeps_query_and_fragment() {
    let (server, _) = common::create_test_server();

    let code = common::shorten(&server, "https://example.com/p?b=2&a=1#top").await;

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(
        response.header("location"),
        "https://example.com/p?b=2&a=1#top"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _) = common::create_test_server();

    let response = server.get("/notfound01").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_malformed_code_skips_store() {
    let state = common::create_test_state(Arc::new(common::UnavailableRepository), None);
    let server = common::server_for(state);

    for code in ["abc", "abcdefghijk", "abc%20defgh"] {
        let response = server.get(&format!("/{code}")).await;
        response.assert_status_not_found();
    }
}

#[tokio::test]
async fn test_redirect_storage_failure() {
    let state = common::create_test_state(Arc::new(common::UnavailableRepository), None);
    let server = common::server_for(state);

    let response = server.get("/AAAAAAAAAA").await;

    assert_eq!(response.status_code(), 500);
}
