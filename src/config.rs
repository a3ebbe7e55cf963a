//! Configuration Module
//!
//! Handles loading and managing Pokedex configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_SECS;

/// Public PokeAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Pokedex configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// PokeAPI base URL, without a trailing slash
    pub base_url: String,
    /// TTL in seconds for cached responses
    pub cache_ttl: u64,
    /// Number of location areas shown per `map`/`mapb` page
    pub page_size: u32,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
    /// Seed for the catch RNG; entropy-seeded when absent
    pub catch_seed: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEAPI_BASE_URL` - PokeAPI base URL (default: https://pokeapi.co/api/v2)
    /// - `CACHE_TTL_SECS` - Cached response lifetime in seconds (default: 300)
    /// - `PAGE_SIZE` - Location areas per page (default: 20)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP timeout in seconds (default: 10)
    /// - `CATCH_SEED` - Fixed seed for catch rolls (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            cache_ttl: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(defaults.cache_ttl),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(defaults.page_size),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(defaults.request_timeout),
            catch_seed: env::var("CATCH_SEED").ok().and_then(|v| v.parse().ok()),
        }
    }

    /// Cached response lifetime as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// HTTP request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// URL of the first page of location areas.
    pub fn first_page_url(&self) -> String {
        format!(
            "{}/location-area/?offset=0&limit={}",
            self.base_url, self.page_size
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_TTL_SECS,
            page_size: 20,
            request_timeout: 10,
            catch_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.request_timeout, 10);
        assert!(config.catch_seed.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("PAGE_SIZE");
        env::remove_var("REQUEST_TIMEOUT_SECS");
        env::remove_var("CATCH_SEED");

        let config = Config::from_env();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.page_size, 20);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.catch_seed.is_none());
    }

    #[test]
    fn test_config_from_env_rejects_zero_timeout() {
        env::set_var("REQUEST_TIMEOUT_SECS", "0");

        let config = Config::from_env();
        assert_eq!(config.request_timeout, 10);

        env::remove_var("REQUEST_TIMEOUT_SECS");
    }

    #[test]
    fn test_first_page_url() {
        let config = Config {
            base_url: "http://127.0.0.1:8080/api/v2".to_string(),
            page_size: 5,
            ..Config::default()
        };
        assert_eq!(
            config.first_page_url(),
            "http://127.0.0.1:8080/api/v2/location-area/?offset=0&limit=5"
        );
    }
}
