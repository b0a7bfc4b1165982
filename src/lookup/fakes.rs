//! In-process test doubles for the store and provider seams.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheKey, MemoryStore, RecordStore};
use crate::error::{ProviderError, StoreError};
use crate::models::MovieRecord;
use crate::provider::MetadataProvider;

/// Provider answering from an in-memory catalogue and counting calls.
#[derive(Default)]
pub struct FakeProvider {
    catalogue: Mutex<HashMap<(String, i32), MovieRecord>>,
    failure: Mutex<Option<ProviderError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn insert(&self, record: MovieRecord) {
        self.catalogue
            .lock()
            .unwrap()
            .insert((record.title.clone(), record.year), record);
    }

    pub fn fail_with(&self, err: ProviderError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for FakeProvider {
    async fn fetch(&self, title: &str, year: i32) -> Result<Option<MovieRecord>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .catalogue
            .lock()
            .unwrap()
            .get(&(title.to_string(), year))
            .cloned())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// MemoryStore wrapper counting traffic, with switchable failures.
#[derive(Default)]
pub struct FakeStore {
    inner: MemoryStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_gets: AtomicBool,
    fail_puts: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Successful writes only.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<MovieRecord>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("read refused".to_string()));
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &CacheKey, record: &MovieRecord) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("write refused".to_string()));
        }
        self.inner.put(key, record).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MovieRecord>, StoreError> {
        self.inner.list_all().await
    }

    async fn len(&self) -> Result<usize, StoreError> {
        self.inner.len().await
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
