//! OMDb wire types.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::models::MovieRecord;

/// Placeholder OMDb uses for fields it has no value for.
const NOT_AVAILABLE: &str = "N/A";

/// Raw OMDb title response.
///
/// Every field is optional on the wire: error replies carry only
/// `Response` and `Error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbResponse {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Metascore")]
    pub metascore: Option<String>,
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbResponse {
    /// `true` when OMDb flagged the reply as a failure.
    pub fn is_failure(&self) -> bool {
        self.response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"))
    }

    /// `true` when the failure means "no such title" rather than a fault.
    pub fn is_not_found(&self) -> bool {
        self.is_failure()
            && self
                .error
                .as_deref()
                .is_some_and(|e| e.to_ascii_lowercase().contains("not found"))
    }

    /// Converts a successful reply into a record.
    ///
    /// `requested_year` is used when OMDb's year is missing, `N/A` or unparseable.
    pub fn into_record(self, requested_year: i32) -> Result<MovieRecord, ProviderError> {
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::Malformed("response has no Title".to_string()))?;

        let year = self
            .year
            .as_deref()
            .and_then(parse_year)
            .unwrap_or(requested_year);

        Ok(MovieRecord {
            title,
            genre: text(self.genre),
            cast: text(self.actors),
            plot: text(self.plot),
            imdb_id: text(self.imdb_id),
            year,
            director: text(self.director),
            rating: optional(self.imdb_rating.as_deref()),
            critic_score: optional(self.metascore.as_deref()),
        })
    }
}

/// Leading four digits of OMDb's year, which may be a range like `2009–2012`.
fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

fn text(value: Option<String>) -> String {
    value.filter(|v| v != NOT_AVAILABLE).unwrap_or_default()
}

fn optional<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value
        .map(str::trim)
        .filter(|v| *v != NOT_AVAILABLE)
        .and_then(|v| v.parse().ok())
}
