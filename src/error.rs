//! Error types for the movie cache
//!
//! Provides per-layer error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Provider Error ==
/// Failure reaching or understanding the metadata provider.
///
/// Cloneable so a single-flight leader can hand the same outcome to
/// every waiting follower.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Connection, DNS or I/O failure
    #[error("Provider transport error: {0}")]
    Transport(String),

    /// Credential rejected by the provider
    #[error("Provider rejected credentials: {0}")]
    Unauthorized(String),

    /// Non-success HTTP status other than auth failures
    #[error("Provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Body could not be decoded into a record
    #[error("Malformed provider response: {0}")]
    Malformed(String),

    /// Call exceeded its deadline
    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),
}

// == Store Error ==
/// Failure of the record store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection or command failure
    #[error("Store backend error: {0}")]
    Backend(String),

    /// Stored value could not be encoded or decoded
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<deadpool_redis::PoolError> for StoreError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

// == Lookup Error ==
/// Error surfaced by the lookup service to its callers.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Caller input rejected before any I/O
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = match &self {
            LookupError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LookupError::Provider(ProviderError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            LookupError::Provider(_) => StatusCode::BAD_GATEWAY,
            LookupError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
