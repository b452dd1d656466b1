//! API route configuration.

use crate::api::handlers::{create_url_handler, get_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Versioned JSON API, nested under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /urls`         - Create a short link
/// - `GET  /urls/{code}`  - Look up the original URL for a code
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/{code}", get(get_url_handler))
}
