//! Public short URL construction from configuration or request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Builds the absolute short URL for `code`.
///
/// When `base_url` is configured it is used as the prefix. Otherwise the
/// prefix is derived from the request: scheme from `X-Forwarded-Proto`
/// (`http` when absent or not `http`/`https`) and authority from `Host`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base URL is configured and the
/// `Host` header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt".parse().unwrap());
///
/// let url = build_short_url(None, &headers, "Abcdef_123").unwrap();
/// assert_eq!(url, "http://sho.rt/Abcdef_123");
/// ```
pub fn build_short_url(
    base_url: Option<&str>,
    headers: &HeaderMap,
    code: &str,
) -> Result<String, AppError> {
    if let Some(base) = base_url {
        return Ok(format!("{}/{}", base.trim_end_matches('/'), code));
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|proto| matches!(*proto, "http" | "https"))
        .unwrap_or("http");

    Ok(format!("{scheme}://{host}/{code}"))
}
