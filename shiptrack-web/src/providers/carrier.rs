//! Carrier tracking adapter
//!
//! Queries an AfterShip-compatible tracking API and translates its status
//! tags into the local order vocabulary. Coordinates come from the latest
//! checkpoint when present, otherwise from geocoding the checkpoint place
//! name. Failures propagate as upstream errors; there is no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shiptrack_common::{Error, LatLng, OrderStatus, Result, DEFAULT_PROGRESS};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{CarrierShipment, Geocoder, TrackingProvider};

/// Default tracking API base URL
const DEFAULT_TRACKING_API_URL: &str = "https://api.aftership.com/v4";

/// Default timeout for tracking API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Translate a carrier status tag into local status + progress.
///
/// The tag set is the small fixed vocabulary the tracking API documents;
/// anything unrecognized defaults to Shipped at 50%.
pub fn map_carrier_tag(tag: &str) -> (OrderStatus, u8) {
    let status = match tag {
        "Pending" | "InfoReceived" => OrderStatus::Processing,
        "InTransit" => OrderStatus::InTransit,
        "OutForDelivery" | "AvailableForPickup" | "AttemptFail" => OrderStatus::OutForDelivery,
        "Delivered" => OrderStatus::Delivered,
        "Exception" => OrderStatus::Returned,
        "Expired" => OrderStatus::Canceled,
        _ => return (OrderStatus::Shipped, DEFAULT_PROGRESS),
    };
    (status, status.progress())
}

/// Tracking provider backed by the external carrier API
pub struct CarrierClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    geocoder: Arc<dyn Geocoder>,
}

impl CarrierClient {
    pub fn new(api_key: String, base_url: Option<String>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_TRACKING_API_URL.to_string()),
            api_key,
            geocoder,
        }
    }

    /// Resolve a checkpoint to coordinates: explicit coordinates win,
    /// otherwise geocode the place name.
    async fn checkpoint_position(&self, checkpoint: &Checkpoint) -> Option<LatLng> {
        if let (Some(lat), Some(lng)) = (checkpoint.latitude, checkpoint.longitude) {
            return Some(LatLng::new(lat, lng));
        }
        let place = checkpoint.place_name()?;
        match self.geocoder.geocode(&place).await {
            Ok(pos) => Some(pos),
            Err(e) => {
                debug!(place = %place, "Checkpoint geocoding failed: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl TrackingProvider for CarrierClient {
    async fn track(&self, carrier_slug: &str, code: &str) -> Result<CarrierShipment> {
        let url = format!("{}/trackings/{}/{}", self.base_url, carrier_slug, code);
        debug!(carrier = %carrier_slug, code = %code, "Querying tracking API");

        let response = self
            .http_client
            .get(&url)
            .header("aftership-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Tracking API request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(Error::NotFound(format!(
                "Carrier has no record of {}",
                code
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Tracking API returned {}: {}",
                status, body
            )));
        }

        let envelope: TrackingEnvelope = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse tracking response: {}", e)))?;

        let tracking = envelope.data.tracking;
        let (local_status, progress) = map_carrier_tag(&tracking.tag);

        // Latest checkpoint drives the map position and the detail line
        let latest = tracking.checkpoints.last();
        let current = match latest {
            Some(cp) => self.checkpoint_position(cp).await,
            None => None,
        };
        let last_checkpoint = latest.and_then(|cp| cp.description());

        Ok(CarrierShipment {
            carrier: tracking
                .slug
                .clone()
                .unwrap_or_else(|| carrier_slug.to_string()),
            code: code.to_string(),
            status: local_status,
            progress,
            current,
            last_checkpoint,
        })
    }
}

// ============================================================================
// Tracking API response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TrackingEnvelope {
    data: TrackingData,
}

#[derive(Debug, Deserialize)]
struct TrackingData {
    tracking: Tracking,
}

#[derive(Debug, Deserialize)]
struct Tracking {
    tag: String,
    slug: Option<String>,
    #[serde(default)]
    checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Deserialize)]
struct Checkpoint {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    state: Option<String>,
    country_name: Option<String>,
    message: Option<String>,
}

impl Checkpoint {
    /// Best-effort place name for geocoding ("City, State, Country")
    fn place_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.state, &self.country_name]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    fn description(&self) -> Option<String> {
        match (&self.message, self.place_name()) {
            (Some(msg), Some(place)) => Some(format!("{} ({})", msg, place)),
            (Some(msg), None) => Some(msg.clone()),
            (None, Some(place)) => Some(place),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_map_to_local_statuses() {
        assert_eq!(
            map_carrier_tag("InfoReceived"),
            (OrderStatus::Processing, 5)
        );
        assert_eq!(map_carrier_tag("InTransit"), (OrderStatus::InTransit, 60));
        assert_eq!(
            map_carrier_tag("OutForDelivery"),
            (OrderStatus::OutForDelivery, 85)
        );
        assert_eq!(map_carrier_tag("Delivered"), (OrderStatus::Delivered, 100));
    }

    #[test]
    fn unrecognized_tag_defaults_to_shipped_fifty() {
        assert_eq!(map_carrier_tag("SomethingNew"), (OrderStatus::Shipped, 50));
        assert_eq!(map_carrier_tag(""), (OrderStatus::Shipped, 50));
    }

    #[test]
    fn checkpoint_place_name_joins_present_parts() {
        let cp = Checkpoint {
            latitude: None,
            longitude: None,
            city: Some("Memphis".to_string()),
            state: Some("TN".to_string()),
            country_name: None,
            message: Some("Departed facility".to_string()),
        };
        assert_eq!(cp.place_name().unwrap(), "Memphis, TN");
        assert_eq!(cp.description().unwrap(), "Departed facility (Memphis, TN)");
    }

    #[test]
    fn empty_checkpoint_has_no_place() {
        let cp = Checkpoint {
            latitude: None,
            longitude: None,
            city: None,
            state: None,
            country_name: None,
            message: None,
        };
        assert!(cp.place_name().is_none());
        assert!(cp.description().is_none());
    }

    #[test]
    fn tracking_response_parses() {
        let json = r#"{
            "data": {
                "tracking": {
                    "tag": "InTransit",
                    "slug": "ups",
                    "checkpoints": [
                        {"city": "Louisville", "state": "KY", "message": "Arrived at hub",
                         "latitude": 38.25, "longitude": -85.76}
                    ]
                }
            }
        }"#;
        let envelope: TrackingEnvelope = serde_json::from_str(json).unwrap();
        let tracking = envelope.data.tracking;
        assert_eq!(tracking.tag, "InTransit");
        assert_eq!(tracking.checkpoints.len(), 1);
        assert_eq!(tracking.checkpoints[0].latitude, Some(38.25));
    }
}
