//! Error types for the storage port, the shortening engine and the HTTP API.
//!
//! - [`StoreError`] - failures reported by a [`crate::domain::repositories::MappingRepository`]
//! - [`ShortenError`] - failures of [`crate::application::services::ShortenerService`]
//! - [`AppError`] - JSON error envelope returned by HTTP handlers

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::code_generator::GenerateError;
use crate::utils::url_validator::UrlValidationError;

/// Failure kinds a mapping store can report.
///
/// `DuplicateCode` and `DuplicateOriginal` must stay distinguishable: the
/// engine retries on the first and reconciles with the race winner on the
/// second.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Short code already exists")]
    DuplicateCode,

    #[error("Original URL already exists")]
    DuplicateOriginal,

    #[error("Storage backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(e.into())
    }
}

/// Errors returned by the shortening engine.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),

    #[error("Short link not found")]
    NotFound,

    #[error("No unique short code after {attempts} attempts")]
    Conflict { attempts: usize },

    #[error(transparent)]
    RandomSource(#[from] GenerateError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn into_parts(self) -> (StatusCode, ErrorInfo) {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        (
            status,
            ErrorInfo {
                code,
                message,
                details,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.into_parts();

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        match e {
            ShortenError::InvalidUrl(reason) => {
                AppError::bad_request("Invalid URL", json!({ "reason": reason.to_string() }))
            }
            ShortenError::NotFound => AppError::not_found("Short link not found", json!({})),
            ShortenError::Conflict { attempts } => AppError::conflict(
                "Too many collisions, could not allocate a short code",
                json!({ "attempts": attempts }),
            ),
            other => {
                tracing::error!(error = %other, "Shortener operation failed");
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Request validation failed", json!(e))
    }
}
