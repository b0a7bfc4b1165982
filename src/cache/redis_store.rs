//! Redis Record Store
//!
//! Networked backend for multi-instance deployments. Records are stored as
//! JSON strings; every key written is also added to a secondary index set
//! in the same MULTI/EXEC transaction, so enumeration never relies on a
//! wildcard scan matching the key scheme.

use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Pool, Runtime};
use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::cache::{CacheKey, RecordStore, INDEX_KEY};
use crate::error::StoreError;
use crate::models::MovieRecord;

// == Redis Store ==
/// Record store backed by a pooled Redis connection.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    /// Wraps an existing connection pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Builds a pool for `url` (e.g. `redis://127.0.0.1:6379`).
    ///
    /// No connection is opened until the first command.
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        let pool = PoolConfig::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        Ok(Self::new(pool))
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, StoreError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<MovieRecord>, StoreError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(key.encode()).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &CacheKey, record: &MovieRecord) -> Result<(), StoreError> {
        let encoded = key.encode();
        let json = serde_json::to_string(record)?;
        let mut conn = self.connection().await?;

        let () = redis::pipe()
            .atomic()
            .set(&encoded, json)
            .ignore()
            .sadd(INDEX_KEY, &encoded)
            .ignore()
            .query_async(&mut conn)
            .await?;

        debug!(key = %encoded, "record stored");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MovieRecord>, StoreError> {
        let mut conn = self.connection().await?;
        let members: Vec<String> = conn.smembers(INDEX_KEY).await?;
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&members)
            .query_async(&mut conn)
            .await?;

        let mut records = Vec::with_capacity(values.len());
        let mut stale = Vec::new();
        for (member, value) in members.into_iter().zip(values) {
            match value {
                Some(json) => records.push(serde_json::from_str(&json)?),
                None => stale.push(member),
            }
        }

        if !stale.is_empty() {
            warn!(count = stale.len(), "index references missing records, pruning");
            let _: () = conn.srem(INDEX_KEY, &stale).await?;
        }

        Ok(records)
    }

    /// Counts through [`RedisStore::list_all`] rather than `SCARD`, so
    /// members whose value has vanished are pruned and not counted.
    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.list_all().await?.len())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
