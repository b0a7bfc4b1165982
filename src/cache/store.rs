//! Record Store Module
//!
//! The key-value capability the lookup service caches into, plus the
//! in-memory backend used for single-instance runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheKey;
use crate::error::StoreError;
use crate::models::MovieRecord;

// == Record Store ==
/// Key-value store of previously fetched movie records.
///
/// Implementations own their concurrency control; a `put` must be visible
/// to every holder of the same store as soon as it returns.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the record under `key`, or `None` when absent.
    async fn get(&self, key: &CacheKey) -> Result<Option<MovieRecord>, StoreError>;

    /// Stores `record` under `key`, replacing any previous entry.
    async fn put(&self, key: &CacheKey, record: &MovieRecord) -> Result<(), StoreError>;

    /// Returns every record currently held, in no particular order.
    async fn list_all(&self) -> Result<Vec<MovieRecord>, StoreError>;

    /// Number of records currently held.
    async fn len(&self) -> Result<usize, StoreError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}

// == Memory Store ==
/// HashMap-backed record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<CacheKey, MovieRecord>>,
}

impl MemoryStore {
    /// Creates an empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<MovieRecord>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &CacheKey, record: &MovieRecord) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.clone(), record.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MovieRecord>, StoreError> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().await.len())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
