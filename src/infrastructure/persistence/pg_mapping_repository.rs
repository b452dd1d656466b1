//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;

/// PostgreSQL repository for URL mappings.
///
/// Uniqueness is enforced by the `url_mappings` primary key on `code` and the
/// unique constraint on `original`; a violated constraint is reported as the
/// matching duplicate kind (see [`crate::utils::db_error`]).
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on database errors.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_original(&self, original_url: &str) -> Result<Option<String>, StoreError> {
        let code =
            sqlx::query_scalar::<_, String>("SELECT code FROM url_mappings WHERE original = $1")
                .bind(original_url)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(code)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<String>, StoreError> {
        let original =
            sqlx::query_scalar::<_, String>("SELECT original FROM url_mappings WHERE code = $1")
                .bind(code)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(original)
    }

    async fn create(&self, code: &str, original_url: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO url_mappings (code, original) VALUES ($1, $2)")
            .bind(code)
            .bind(original_url)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
