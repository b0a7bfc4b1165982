//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::provider::DEFAULT_BASE_URL;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// OMDb access key
    pub omdb_api_key: String,
    /// OMDb API root
    pub omdb_base_url: String,
    /// Redis connection URL; in-memory store when unset
    pub redis_url: Option<String>,
    /// HTTP server port
    pub server_port: u16,
    /// Provider call deadline in seconds
    pub provider_timeout: u64,
    /// Coalesce concurrent provider calls for the same key
    pub single_flight: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `OMDB_API_KEY` - OMDb access key (default: empty)
    /// - `OMDB_BASE_URL` - OMDb API root (default: http://www.omdbapi.com)
    /// - `REDIS_URL` - Redis URL (default: unset, in-memory store)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PROVIDER_TIMEOUT_SECS` - Provider deadline in seconds (default: 5)
    /// - `SINGLE_FLIGHT` - `false`/`0` disables coalescing (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            omdb_api_key: env::var("OMDB_API_KEY").unwrap_or(defaults.omdb_api_key),
            omdb_base_url: env::var("OMDB_BASE_URL").unwrap_or(defaults.omdb_base_url),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            provider_timeout: env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.provider_timeout),
            single_flight: env::var("SINGLE_FLIGHT")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.single_flight),
        }
    }

    /// Provider deadline as a Duration.
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            omdb_api_key: String::new(),
            omdb_base_url: DEFAULT_BASE_URL.to_string(),
            redis_url: None,
            server_port: 3000,
            provider_timeout: 5,
            single_flight: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.omdb_base_url, "http://www.omdbapi.com");
        assert!(config.redis_url.is_none());
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.provider_timeout(), Duration::from_secs(5));
        assert!(config.single_flight);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("OMDB_API_KEY");
        env::remove_var("OMDB_BASE_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("PROVIDER_TIMEOUT_SECS");
        env::remove_var("SINGLE_FLIGHT");

        let config = Config::from_env();
        assert_eq!(config.omdb_api_key, "");
        assert_eq!(config.omdb_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.provider_timeout, 5);
        assert!(config.single_flight);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
