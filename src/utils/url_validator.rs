//! URL validation and normalization.
//!
//! The normalized form is whatever the WHATWG URL parser serializes: scheme
//! and host are lower-cased, default ports are dropped and an empty path
//! becomes `/`. Nothing else is rewritten. Query parameter order, fragments
//! and trailing slashes on non-empty paths are preserved, so two such variants
//! are distinct URLs.

use url::Url;

/// Maximum accepted length of a trimmed input URL, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL is {length} bytes long, maximum is {max}")]
    TooLong { length: usize, max: usize },

    #[error("Invalid URL format: {0}")]
    Malformed(url::ParseError),

    #[error("Only HTTP and HTTPS protocols are allowed, got '{0}'")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("URL contains a control character")]
    ControlCharacter,
}

/// Validates a raw URL and returns its canonical serialization.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. The trimmed input must be non-empty and at most [`MAX_URL_LENGTH`] bytes
/// 3. It must not contain ASCII control characters (tab, CR and LF included)
/// 4. It must parse as a URL with scheme `http` or `https`
/// 5. It must spell out an authority (`scheme://host...`) with a non-empty host
///
/// The WHATWG parser invents a host for inputs such as `http:example.com` or
/// `https:///example.com`; those are rejected rather than rewritten.
///
/// # Errors
///
/// Returns the matching [`UrlValidationError`] for the first rule violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     validate_url("  HTTPS://EXAMPLE.COM:443/Path ").unwrap(),
///     "https://example.com/Path"
/// );
/// assert!(validate_url("ftp://example.com").is_err());
/// ```
pub fn validate_url(raw: &str) -> Result<String, UrlValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong {
            length: trimmed.len(),
            max: MAX_URL_LENGTH,
        });
    }

    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(trimmed).map_err(UrlValidationError::Malformed)?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if !has_explicit_authority(trimmed) || url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url.into())
}

/// True if `input` continues with `//` after its scheme and the authority
/// does not start with another slash.
fn has_explicit_authority(input: &str) -> bool {
    let Some((_, rest)) = input.split_once(':') else {
        return false;
    };

    rest.strip_prefix("//")
        .is_some_and(|authority| !authority.starts_with(['/', '\\']))
}
