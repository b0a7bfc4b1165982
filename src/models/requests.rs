//! Request DTOs for the movie cache API
//!
//! Defines the query parameters accepted by the HTTP surface.

use serde::Deserialize;

/// Query parameters for GET /getMovie
///
/// Title validation happens in the lookup service, so every caller gets it.
///
/// # Fields
/// - `name`: The movie title
/// - `year`: The release year
#[derive(Debug, Clone, Deserialize)]
pub struct MovieQuery {
    /// The movie title
    pub name: String,
    /// The release year
    pub year: i32,
}
