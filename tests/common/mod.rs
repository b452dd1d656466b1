#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use shortly::application::services::{DynShortenerService, ShortenerService};
use shortly::domain::repositories::MappingRepository;
use shortly::error::StoreError;
use shortly::infrastructure::metrics::PrometheusMetrics;
use shortly::infrastructure::persistence::InMemoryMappingRepository;
use shortly::routes::router;
use shortly::state::AppState;
use shortly::utils::code_generator::OsCodeGenerator;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_HOST: &str = "sho.rt";

/// Store whose every operation fails, for exercising 5xx and health paths.
pub struct UnavailableRepository;

#[async_trait]
impl MappingRepository for UnavailableRepository {
    async fn find_by_original(&self, _original_url: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn create(&self, _code: &str, _original_url: &str) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused"))
    }
}

pub fn create_test_state(
    repository: Arc<dyn MappingRepository>,
    base_url: Option<&str>,
) -> AppState {
    let metrics = Arc::new(PrometheusMetrics::new().unwrap());
    let shortener: Arc<DynShortenerService> = Arc::new(
        ShortenerService::new(repository, OsCodeGenerator).with_metrics(metrics.clone()),
    );

    AppState::new(shortener, base_url.map(str::to_string), metrics)
}

/// Server over a fresh in-memory store; the store is returned for inspection.
pub fn create_test_server() -> (TestServer, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let state = create_test_state(repository.clone(), None);

    (server_for(state), repository)
}

pub fn server_for(state: AppState) -> TestServer {
    TestServer::new(router(state, Duration::from_secs(5))).unwrap()
}

/// Shortens `url` through the API and returns the code.
pub async fn shorten(server: &TestServer, url: &str) -> String {
    let response = server
        .post("/api/v1/urls")
        .add_header("Host", TEST_HOST)
        .json(&serde_json::json!({ "url": url }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<serde_json::Value>()["code"]
        .as_str()
        .unwrap()
        .to_string()
}
