//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Indexes {
    /// original URL -> code
    by_original: HashMap<String, String>,
    /// code -> original URL
    by_code: HashMap<String, String>,
}

/// Process-local mapping storage.
///
/// Both indexes live behind a single lock, so the uniqueness checks and the
/// insert of [`create`](MappingRepository::create) form one critical section.
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryMappingRepository {
    indexes: RwLock<Indexes>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored mappings.
    pub async fn len(&self) -> usize {
        self.indexes.read().await.by_code.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn find_by_original(&self, original_url: &str) -> Result<Option<String>, StoreError> {
        Ok(self.indexes.read().await.by_original.get(original_url).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<String>, StoreError> {
        Ok(self.indexes.read().await.by_code.get(code).cloned())
    }

    async fn create(&self, code: &str, original_url: &str) -> Result<(), StoreError> {
        let mut indexes = self.indexes.write().await;

        if indexes.by_original.contains_key(original_url) {
            return Err(StoreError::DuplicateOriginal);
        }
        if indexes.by_code.contains_key(code) {
            return Err(StoreError::DuplicateCode);
        }

        indexes
            .by_original
            .insert(original_url.to_owned(), code.to_owned());
        indexes
            .by_code
            .insert(code.to_owned(), original_url.to_owned());

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
