//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`             - Short link redirect (302)
//! - `GET  /health`             - Health report with storage check
//! - `GET  /healthz`            - Liveness check
//! - `GET  /readyz`             - Readiness check (storage ping)
//! - `GET  /metrics`            - Prometheus counters
//! - `POST /api/v1/urls`        - Create a short link
//! - `GET  /api/v1/urls/{code}` - Resolve a short link as JSON
//!
//! # Middleware
//!
//! - **Request ID** - `x-request-id` assigned if absent and echoed on the response
//! - **Tracing** - Structured request/response logging, tagged with the request ID
//! - **Timeout** - Requests exceeding the configured duration get 408
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    health_handler, liveness_handler, metrics_handler, readiness_handler, redirect_handler,
};
use crate::api::middleware::{request_id, timeout, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// Static routes take precedence over `/{code}`, so `health`, `healthz`,
/// `readyz` and `metrics` never reach the redirect handler.
///
/// Layers run outermost first: request ID assignment, tracing, request ID
/// propagation, timeout.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/healthz", get(liveness_handler))
        .route("/readyz", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", api::routes::routes())
        .with_state(state)
        .layer(timeout::layer(request_timeout))
        .layer(request_id::propagate_layer())
        .layer(tracing::layer())
        .layer(request_id::set_layer())
}

/// Constructs the application service served by [`crate::server::run`].
///
/// Wraps [`router`] so that `/api/v1/urls/` and `/api/v1/urls` are the same route.
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, request_timeout))
}
