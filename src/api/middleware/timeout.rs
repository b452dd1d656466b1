//! Per-request timeout middleware.

use axum::http::StatusCode;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Creates a layer that aborts requests running longer than `timeout`.
///
/// The handler future is dropped on expiry, which cancels any pending store
/// call, and the client receives `408 Request Timeout`.
pub fn layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
