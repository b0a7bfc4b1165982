//! Lookup Service
//!
//! Cache-aside orchestration: answer from the record store when possible,
//! otherwise fetch from the metadata provider and populate the store.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::single_flight::{Flight, Outcome, SingleFlight};
use crate::cache::{CacheKey, LookupStats, RecordStore, StatsSnapshot};
use crate::error::{LookupError, ProviderError, Result};
use crate::models::MovieRecord;
use crate::provider::MetadataProvider;

/// Provider deadline used by [`LookupService::lookup`] unless overridden.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

// == Lookup Service ==
/// Read-through movie lookup over a record store and a metadata provider.
///
/// Negative provider answers and provider failures are never cached. A
/// failed store write after a successful fetch is logged and the fetched
/// record is still returned.
pub struct LookupService {
    store: Arc<dyn RecordStore>,
    provider: Arc<dyn MetadataProvider>,
    flights: Option<SingleFlight>,
    timeout: Duration,
    stats: Arc<LookupStats>,
}

impl LookupService {
    // == Constructor ==
    /// Creates a service with single-flight enabled and the default timeout.
    pub fn new(store: Arc<dyn RecordStore>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            store,
            provider,
            flights: Some(SingleFlight::new()),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            stats: Arc::new(LookupStats::new()),
        }
    }

    /// Sets the default provider deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables per-key coalescing of provider calls.
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.flights = enabled.then(SingleFlight::new);
        self
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Returns current lookup statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // == Lookup ==
    /// Returns the record for (`title`, `year`), or `None` if the provider has none.
    pub async fn lookup(&self, title: &str, year: i32) -> Result<Option<MovieRecord>> {
        self.lookup_with_timeout(title, year, self.timeout).await
    }

    /// Like [`LookupService::lookup`] with a caller-supplied provider deadline.
    ///
    /// A deadline overrun surfaces as [`ProviderError::Timeout`]; nothing is retried.
    pub async fn lookup_with_timeout(
        &self,
        title: &str,
        year: i32,
        timeout: Duration,
    ) -> Result<Option<MovieRecord>> {
        if title.trim().is_empty() {
            return Err(LookupError::InvalidRequest(
                "Movie title cannot be empty".to_string(),
            ));
        }

        let key = CacheKey::new(title, year);

        if let Some(record) = self.cached(&key).await {
            info!(key = %key, "Cache hit");
            self.stats.record_hit();
            return Ok(Some(record));
        }

        info!(key = %key, "Cache miss");

        // One deadline covers the provider call, any wait on another
        // request's call, and retries after an abandoned leader.
        let deadline = Instant::now() + timeout;
        let outcome = match &self.flights {
            Some(flights) => self.fetch_coalesced(flights, &key, deadline, timeout).await,
            None => {
                self.stats.record_miss();
                self.fetch_and_store(&key, deadline, timeout).await
            }
        };

        Ok(outcome?)
    }

    // == List All ==
    /// Returns every record currently cached, in no particular order.
    pub async fn list_all_cached(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.store.list_all().await?)
    }

    /// Store read that degrades backend failures to a miss.
    async fn cached(&self, key: &CacheKey) -> Option<MovieRecord> {
        match self.store.get(key).await {
            Ok(found) => found,
            Err(e) => {
                warn!(key = %key, store = self.store.name(), error = %e, "store read failed, treating as miss");
                self.stats.record_store_error();
                None
            }
        }
    }

    async fn fetch_coalesced(
        &self,
        flights: &SingleFlight,
        key: &CacheKey,
        deadline: Instant,
        timeout: Duration,
    ) -> Outcome {
        loop {
            match flights.join(key) {
                Flight::Leader(guard) => {
                    // A previous leader may have populated the store since our miss.
                    // Read failures were already counted by the first lookup.
                    let outcome = match self.store.get(key).await.ok().flatten() {
                        Some(record) => {
                            self.stats.record_hit();
                            Ok(Some(record))
                        }
                        None => {
                            self.stats.record_miss();
                            self.fetch_and_store(key, deadline, timeout).await
                        }
                    };
                    guard.complete(&outcome);
                    return outcome;
                }
                Flight::Follower(mut receiver) => {
                    debug!(key = %key, "awaiting in-flight fetch");
                    match tokio::time::timeout_at(deadline, receiver.recv()).await {
                        Ok(Ok(outcome)) => {
                            self.stats.record_miss();
                            self.stats.record_coalesced();
                            return outcome;
                        }
                        Ok(Err(_)) => {
                            debug!(key = %key, "in-flight fetch abandoned, retrying");
                        }
                        Err(_) => {
                            warn!(key = %key, ?timeout, "deadline passed while awaiting in-flight fetch");
                            self.stats.record_miss();
                            self.stats.record_provider_error();
                            return Err(ProviderError::Timeout(timeout));
                        }
                    }
                }
            }
        }
    }

    async fn fetch_and_store(&self, key: &CacheKey, deadline: Instant, timeout: Duration) -> Outcome {
        self.stats.record_provider_call();

        let fetched =
            tokio::time::timeout_at(deadline, self.provider.fetch(key.title(), key.year()))
                .await
                .unwrap_or(Err(ProviderError::Timeout(timeout)));

        match fetched {
            Ok(Some(record)) => {
                if let Err(e) = self.store.put(key, &record).await {
                    warn!(key = %key, store = self.store.name(), error = %e, "store write failed, returning fetched record");
                    self.stats.record_store_error();
                }
                Ok(Some(record))
            }
            Ok(None) => {
                info!(key = %key, provider = self.provider.name(), "title not found");
                self.stats.record_not_found();
                Ok(None)
            }
            Err(e) => {
                warn!(key = %key, provider = self.provider.name(), error = %e, "provider fetch failed");
                self.stats.record_provider_error();
                Err(e)
            }
        }
    }
}
