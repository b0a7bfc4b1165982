//! Movie record value object
//!
//! The metadata payload returned to callers and persisted in the record store.

use serde::{Deserialize, Serialize};

/// Metadata for one movie title.
///
/// `cast` is kept exactly as the provider joins it (comma-separated names).
/// Optional scores stay `None` when the provider omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub genre: String,
    pub cast: String,
    pub plot: String,
    pub imdb_id: String,
    pub year: i32,
    pub director: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critic_score: Option<i32>,
}

impl MovieRecord {
    /// Creates a record with the two identifying fields set and everything else empty.
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            genre: String::new(),
            cast: String::new(),
            plot: String::new(),
            imdb_id: String::new(),
            year,
            director: String::new(),
            rating: None,
            critic_score: None,
        }
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}
