//! Metadata Provider Module
//!
//! The remote source of truth for movie metadata and its OMDb adapter.

mod omdb;
mod types;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::MovieRecord;

pub use omdb::{OmdbProvider, DEFAULT_BASE_URL};

/// Source of authoritative movie metadata.
///
/// Stateless from the caller's point of view; never touches the cache.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetches the record for `title` released in `year`.
    ///
    /// Returns `Ok(None)` when the provider has no match for the pair.
    async fn fetch(&self, title: &str, year: i32) -> Result<Option<MovieRecord>, ProviderError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
