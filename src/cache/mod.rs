//! Cache Module
//!
//! Record store capability, its in-memory and Redis backends, the cache key
//! scheme and lookup statistics.

mod key;
mod redis_store;
mod stats;
mod store;

// Re-export public types
pub use key::{CacheKey, INDEX_KEY, KEY_NAMESPACE};
pub use redis_store::RedisStore;
pub use stats::{LookupStats, StatsSnapshot};
pub use store::{MemoryStore, RecordStore};
