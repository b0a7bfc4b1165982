//! Domain and transport models for the movie cache
//!
//! `MovieRecord` is the cached value; the request/response DTOs are
//! used for serializing/deserializing HTTP traffic.

pub mod movie;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use movie::MovieRecord;
pub use requests::MovieQuery;
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
