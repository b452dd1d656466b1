//! Handlers for health check endpoints.

use axum::{Json, extract::State, http::StatusCode};
use std::time::Instant;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: Storage is unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "latency_ms": 1 }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;

    let healthy = storage_check.is_ok();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            storage: storage_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness check. Always `200 ok` while the process serves requests.
///
/// `GET /healthz`
pub async fn liveness_handler() -> &'static str {
    "ok"
}

/// Readiness check backed by a storage ping.
///
/// `GET /readyz`
///
/// - **200 OK** `ready`: the store answered
/// - **503 Service Unavailable** `not ready`: the store is unreachable
pub async fn readiness_handler(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.shortener.check_storage().await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "not ready")
        }
    }
}

/// Pings the mapping store and times the round trip.
async fn check_storage(state: &AppState) -> CheckStatus {
    let started = Instant::now();
    let result = state.shortener.check_storage().await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(()) => CheckStatus {
            status: "ok",
            latency_ms,
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            CheckStatus {
                status: "error",
                latency_ms,
                message: Some("Storage unavailable".to_string()),
            }
        }
    }
}
