//! Prometheus scrape endpoint.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::infrastructure::metrics::prometheus_metrics::CONTENT_TYPE;
use crate::state::AppState;

/// Renders the engine counters in the Prometheus text format.
///
/// `GET /metrics`
///
/// Returns `500` with a plain-text body if encoding fails.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.export() {
        Ok(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to encode metrics").into_response()
        }
    }
}
