//! Response DTOs for the movie cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups that had to consult the provider
    pub misses: u64,
    /// Outbound provider calls actually made
    pub provider_calls: u64,
    /// Provider answers with no matching title
    pub not_found: u64,
    /// Provider failures surfaced to callers
    pub provider_errors: u64,
    /// Store failures absorbed during lookups
    pub store_errors: u64,
    /// Lookups that waited on another request's provider call
    pub coalesced: u64,
    /// Current number of records in the store
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a stats snapshot and the store size
    pub fn new(stats: StatsSnapshot, total_entries: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            provider_calls: stats.provider_calls,
            not_found: stats.not_found,
            provider_errors: stats.provider_errors,
            store_errors: stats.store_errors,
            coalesced: stats.coalesced,
            total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
