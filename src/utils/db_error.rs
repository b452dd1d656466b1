//! Classification of PostgreSQL errors into store failure kinds.

use crate::error::StoreError;

/// Primary key constraint on `url_mappings.code`.
pub const CODE_CONSTRAINT: &str = "url_mappings_pkey";

/// Unique constraint on `url_mappings.original`.
pub const ORIGINAL_CONSTRAINT: &str = "url_mappings_original_key";

/// Maps a unique violation to the duplicate kind named by its constraint.
///
/// Returns `None` for any other error, including unique violations on
/// constraints this crate does not own.
pub fn unique_violation_kind(e: &sqlx::Error) -> Option<StoreError> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(CODE_CONSTRAINT) => Some(StoreError::DuplicateCode),
        Some(ORIGINAL_CONSTRAINT) => Some(StoreError::DuplicateOriginal),
        _ => None,
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        unique_violation_kind(&e).unwrap_or_else(|| StoreError::backend(e))
    }
}
