//! Shared API request/response types
//!
//! JSON shapes exchanged between the shiptrack-web handlers and the
//! browser UI. Kept in the common crate so tests and any future companion
//! tools deserialize the same structs the server serializes.

use crate::geo::LatLng;
use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};

/// Route block inside a track response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteInfo {
    pub origin: LatLng,
    pub dest: LatLng,
    /// Interpolated position at the order's current progress
    pub current: LatLng,
    #[serde(rename = "originName", skip_serializing_if = "Option::is_none")]
    pub origin_name: Option<String>,
    #[serde(rename = "destName", skip_serializing_if = "Option::is_none")]
    pub dest_name: Option<String>,
}

/// Response body for GET/POST /api/track and SSE snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackResponse {
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub status: OrderStatus,
    /// Integer percentage in [0,100] derived from status
    pub progress: u8,
    pub route: RouteInfo,
    /// Cosmetic 3-point curve for map display
    pub polyline: Vec<LatLng>,
}

/// Request body for POST /api/track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackRequest {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
}

/// Request body for POST /api/track-any
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackAnyRequest {
    pub query: String,
}

/// Request body for POST /api/subscribe
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscribeRequest {
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub email: String,
}

/// Request body for POST /api/chat
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for POST /api/chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    /// "ai" when relayed through the completion provider, "rules" otherwise
    pub source: String,
}

/// Standard error body: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
