//! PokeAPI Client
//!
//! HTTP lookups memoized through per-resource TTL caches.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationPage, Pokemon};

/// PokeAPI client with write-through response caches.
///
/// Each cache stores raw response bodies:
/// - `locations` keyed by the full page URL, so adjacent pages are independent
/// - `areas` keyed by location-area name
/// - `pokemon` keyed by Pokemon name
#[derive(Debug)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    locations: Cache,
    areas: Cache,
    pokemon: Cache,
}

impl PokeApiClient {
    /// Creates a client whose caches all share `cache_ttl`.
    ///
    /// Must be called inside a tokio runtime, which hosts the cache reapers.
    pub fn new(base_url: impl Into<String>, cache_ttl: Duration, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locations: Cache::new(cache_ttl)?,
            areas: Cache::new(cache_ttl)?,
            pokemon: Cache::new(cache_ttl)?,
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.cache_ttl(),
            config.request_timeout(),
        )
    }

    /// Fetches one page of location areas by its full URL.
    pub async fn location_page(&self, url: &str) -> Result<LocationPage> {
        self.cached_fetch(&self.locations, url, url).await
    }

    /// Fetches the encounter table of a location area.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.cached_fetch(&self.areas, name, &url).await
    }

    /// Fetches a Pokemon's stats.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.cached_fetch(&self.pokemon, name, &url).await
    }

    /// Stops the reapers of every cache.
    pub async fn close(&self) {
        self.locations.stop().await;
        self.areas.stop().await;
        self.pokemon.stop().await;
    }

    /// Location-page cache, exposed for inspection.
    pub fn location_cache(&self) -> &Cache {
        &self.locations
    }

    /// Location-area cache, exposed for inspection.
    pub fn area_cache(&self) -> &Cache {
        &self.areas
    }

    /// Pokemon cache, exposed for inspection.
    pub fn pokemon_cache(&self) -> &Cache {
        &self.pokemon
    }

    /// Decodes a cached body for `key`, or fetches `url`, decodes it and
    /// caches the raw bytes. Nothing is cached when the fetch or decode fails.
    async fn cached_fetch<T: DeserializeOwned>(
        &self,
        cache: &Cache,
        key: &str,
        url: &str,
    ) -> Result<T> {
        if let Some(body) = cache.get(key) {
            debug!(key = %key, "serving cached response");
            return Ok(serde_json::from_slice(&body)?);
        }

        let body = self.fetch(url).await?;
        let decoded = serde_json::from_slice(&body)?;
        cache.add(key, body);
        Ok(decoded)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url = %url, "fetching from PokeAPI");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
