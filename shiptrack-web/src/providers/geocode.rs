//! Geocoding adapter with a persisted file cache
//!
//! Resolves place names to coordinates through a Nominatim-compatible
//! endpoint. Results are cached in a JSON file (place → lat/lng) with no
//! eviction and no expiry; the cache is read at startup and rewritten
//! after every new entry.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use shiptrack_common::{Error, LatLng, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::Geocoder;

/// Default geocoding endpoint (Nominatim search API)
const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default timeout for geocoding requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent header (required by the Nominatim usage policy)
const USER_AGENT: &str = "shiptrack/0.1.0 (demo order tracker)";

/// Geocoder backed by a Nominatim-style API plus a file cache
pub struct GeocodeClient {
    http_client: Client,
    base_url: String,
    cache_path: PathBuf,
    cache: Mutex<HashMap<String, LatLng>>,
}

impl GeocodeClient {
    /// Create a client, loading any existing cache file
    pub fn new(base_url: Option<String>, cache_path: PathBuf) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        let cache = load_cache(&cache_path);
        debug!(entries = cache.len(), "Loaded geocode cache");

        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .default_headers(headers)
                .build()
                .unwrap_or_default(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_string()),
            cache_path,
            cache: Mutex::new(cache),
        }
    }

    async fn lookup_remote(&self, place: &str) -> Result<LatLng> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "Geocoding service returned {}",
                response.status()
            )));
        }

        let hits: Vec<GeocodeHit> = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse geocoding response: {}", e)))?;

        let hit = hits
            .first()
            .ok_or_else(|| Error::NotFound(format!("No geocoding result for: {}", place)))?;

        let lat: f64 = hit
            .lat
            .parse()
            .map_err(|_| Error::Upstream("Non-numeric latitude in geocoding response".into()))?;
        let lng: f64 = hit
            .lon
            .parse()
            .map_err(|_| Error::Upstream("Non-numeric longitude in geocoding response".into()))?;

        Ok(LatLng::new(lat, lng))
    }
}

#[async_trait]
impl Geocoder for GeocodeClient {
    async fn geocode(&self, place: &str) -> Result<LatLng> {
        let key = place.trim().to_lowercase();

        {
            let cache = self.cache.lock().await;
            if let Some(pos) = cache.get(&key) {
                debug!(place = %place, "Geocode cache hit");
                return Ok(*pos);
            }
        }

        let pos = self.lookup_remote(place).await?;

        let mut cache = self.cache.lock().await;
        cache.insert(key, pos);
        if let Err(e) = save_cache(&self.cache_path, &cache) {
            // The lookup still succeeded; only persistence is degraded
            warn!("Failed to persist geocode cache: {}", e);
        }

        Ok(pos)
    }
}

fn load_cache(path: &PathBuf) -> HashMap<String, LatLng> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => HashMap::new(),
    }
}

fn save_cache(path: &PathBuf, cache: &HashMap<String, LatLng>) -> Result<()> {
    let content = serde_json::to_string_pretty(cache)
        .map_err(|e| Error::Internal(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cache_hit_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("geocode-cache.json");
        std::fs::write(
            &cache_path,
            r#"{"springfield, il": {"lat": 39.78, "lng": -89.65}}"#,
        )
        .unwrap();

        // base_url points nowhere routable; a cache hit must not touch it
        let client = GeocodeClient::new(
            Some("http://127.0.0.1:1/search".to_string()),
            cache_path,
        );
        let pos = client.geocode("Springfield, IL").await.unwrap();
        assert_eq!(pos, LatLng::new(39.78, -89.65));
    }

    #[tokio::test]
    async fn unreachable_service_is_upstream_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = GeocodeClient::new(
            Some("http://127.0.0.1:1/search".to_string()),
            dir.path().join("geocode-cache.json"),
        );
        let err = client.geocode("Nowhere").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[test]
    fn corrupt_cache_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geocode-cache.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_cache(&path).is_empty());
    }
}
