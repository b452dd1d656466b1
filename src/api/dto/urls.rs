//! DTOs for short link creation and lookup.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// Scheme, host and length rules are enforced by the service; the DTO only
/// rejects a missing or empty field.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub code: String,
    pub short_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveUrlResponse {
    pub url: String,
}
