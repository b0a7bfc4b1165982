//! OMDb HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::types::OmdbResponse;
use super::MetadataProvider;
use crate::error::ProviderError;
use crate::models::MovieRecord;

/// Default public OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com";

/// OMDb API client.
pub struct OmdbProvider {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OmdbProvider {
    /// Create a new OMDb client.
    ///
    /// # Arguments
    /// * `base_url` - API root, without trailing slash
    /// * `api_key` - OMDb access key
    /// * `timeout` - Per-request deadline enforced by the HTTP client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Transport(format!("HTTP request failed: {}", err))
        }
    }
}

#[async_trait]
impl MetadataProvider for OmdbProvider {
    async fn fetch(&self, title: &str, year: i32) -> Result<Option<MovieRecord>, ProviderError> {
        let url = format!("{}/", self.base_url);
        let year_param = year.to_string();

        debug!(title = %title, year, "querying omdb");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("t", title),
                ("y", year_param.as_str()),
                ("type", "movie"),
            ])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let parsed = serde_json::from_str::<OmdbResponse>(&body);

        if status == StatusCode::UNAUTHORIZED {
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| "Unauthorized".to_string());
            return Err(ProviderError::Unauthorized(message));
        }

        if !status.is_success() {
            let message = parsed.ok().and_then(|r| r.error).unwrap_or(body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = parsed
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse response: {}", e)))?;

        if parsed.is_not_found() {
            return Ok(None);
        }

        if parsed.is_failure() {
            let message = parsed.error.unwrap_or_else(|| "Unknown error".to_string());
            if message.to_ascii_lowercase().contains("api key") {
                return Err(ProviderError::Unauthorized(message));
            }
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        parsed.into_record(year).map(Some)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

impl std::fmt::Debug for OmdbProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}
