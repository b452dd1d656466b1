//! Handlers for short link creation and lookup.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::urls::{CreateUrlRequest, CreateUrlResponse, ResolveUrlResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::build_short_url;

/// Creates (or returns the existing) short link for a URL.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created` with a `Location` header pointing at the short URL:
///
/// ```json
/// {
///   "code": "aZ3_kQ9xPb",
///   "short_url": "https://sho.rt/aZ3_kQ9xPb"
/// }
/// ```
///
/// Shortening the same URL again returns the same code.
///
/// # Errors
///
/// - **400 Bad Request**: malformed JSON, missing `url`, or URL rejected by validation
/// - **409 Conflict**: no free code found within the retry budget
/// - **500 Internal Server Error**: storage or randomness failure
pub async fn create_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let code = state.shortener.create(&payload.url).await?;
    let short_url = build_short_url(state.base_url.as_deref(), &headers, &code)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, short_url.clone())],
        Json(CreateUrlResponse { code, short_url }),
    ))
}

/// Returns the original URL for a short code without redirecting.
///
/// # Endpoint
///
/// `GET /api/v1/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or malformed.
pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ResolveUrlResponse>, AppError> {
    let url = state.shortener.resolve(&code).await?;

    Ok(Json(ResolveUrlResponse { url }))
}
