//! Cache Key Module
//!
//! Structured key for movie records and its storage encoding.

use std::fmt;

// == Constants ==
/// Namespace prefix shared by every record key.
pub const KEY_NAMESPACE: &str = "movie";

/// Name of the secondary index holding every record key written.
///
/// Never collides with a record key: record keys always carry a numeric year
/// segment after the namespace.
pub const INDEX_KEY: &str = "movie-index";

// == Cache Key ==
/// Identifies one cached record by (title, year).
///
/// Encoded as `movie:{year}:{title}`. A year's decimal form never contains
/// `:`, so the first separator after the namespace always terminates the
/// year and the rest is the title verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    title: String,
    year: i32,
}

impl CacheKey {
    /// Creates a key for the given title and year.
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    // == Encode ==
    /// Returns the string form used as the backend key.
    pub fn encode(&self) -> String {
        format!("{}:{}:{}", KEY_NAMESPACE, self.year, self.title)
    }

    // == Parse ==
    /// Reverses [`CacheKey::encode`].
    ///
    /// Returns `None` for strings outside the record namespace.
    #[cfg(test)]
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(KEY_NAMESPACE)?.strip_prefix(':')?;
        let (year, title) = rest.split_once(':')?;
        let year = year.parse().ok()?;
        Some(Self::new(title, year))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
