//! Repository trait for URL mapping storage.

use crate::error::StoreError;
use async_trait::async_trait;

/// Storage contract required by the shortening engine.
///
/// Implementations must enforce uniqueness of both `code` and
/// `original_url` as data invariants inside [`create`](Self::create), not
/// through a prior existence check: concurrent callers race between a lookup
/// and an insert, and exactly one of them may win.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local maps
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL table
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds the code stored for a normalized URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn find_by_original(&self, original_url: &str) -> Result<Option<String>, StoreError>;

    /// Finds the normalized URL stored for a code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn find_by_code(&self, code: &str) -> Result<Option<String>, StoreError>;

    /// Atomically inserts a new mapping.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateCode`] if `code` is already taken
    /// - [`StoreError::DuplicateOriginal`] if `original_url` is already mapped
    /// - [`StoreError::Backend`] on any other storage failure
    async fn create(&self, code: &str, original_url: &str) -> Result<(), StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
