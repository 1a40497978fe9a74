//! Third-party provider adapters
//!
//! Each external service sits behind a small capability trait so handler
//! logic is tested against fakes while the reqwest implementations stay at
//! the boundary. Every provider is optional: construction is skipped when
//! its credentials are absent and callers degrade to a "not configured"
//! note.

pub mod ai;
pub mod carrier;
pub mod geocode;
pub mod gmail;
pub mod mail;

use async_trait::async_trait;
use shiptrack_common::{LatLng, OrderStatus, Result};

/// Shipment state translated from a third-party tracking response
#[derive(Debug, Clone)]
pub struct CarrierShipment {
    /// Carrier display name (e.g. "UPS")
    pub carrier: String,
    pub code: String,
    /// Status translated into the local vocabulary
    pub status: OrderStatus,
    pub progress: u8,
    /// Position from checkpoint coordinates or geocoded place name
    pub current: Option<LatLng>,
    /// Most recent checkpoint description, when the carrier supplied one
    pub last_checkpoint: Option<String>,
}

/// Third-party shipment tracking lookup
#[async_trait]
pub trait TrackingProvider: Send + Sync {
    async fn track(&self, carrier_slug: &str, code: &str) -> Result<CarrierShipment>;
}

/// External AI completion relay
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Outbound email
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Place name → coordinates lookup
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &str) -> Result<LatLng>;
}
