//! In-memory demo order table
//!
//! The demo dataset stands in for a real order database. Orders are seeded
//! at process start and never deleted; the only mutation is the admin
//! advance action stepping the status one stage forward.

use async_trait::async_trait;
use shiptrack_common::{geo, Error, LatLng, OrderStatus, Result};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// A single demo order
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: String,
    pub status: OrderStatus,
    pub origin: LatLng,
    pub dest: LatLng,
    pub origin_name: Option<String>,
    pub dest_name: Option<String>,
}

impl OrderRecord {
    /// Progress percentage from the static status table
    pub fn progress(&self) -> u8 {
        self.status.progress()
    }

    /// Interpolated current position at the order's progress
    pub fn current_position(&self) -> LatLng {
        geo::position_at(self.origin, self.dest, self.progress())
    }
}

/// Result of an advance operation
#[derive(Debug, Clone)]
pub struct AdvanceOutcome {
    pub order: OrderRecord,
    /// False when the order was already at a terminal status
    pub changed: bool,
}

/// Order data access injected into request handlers
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get(&self, id: &str) -> Option<OrderRecord>;
    async fn list(&self) -> Vec<OrderRecord>;
    /// Step the order one stage forward; Err(NotFound) for unknown ids
    async fn advance(&self, id: &str) -> Result<AdvanceOutcome>;
}

/// Order store backed by a seeded in-memory table
pub struct MemoryOrderStore {
    orders: RwLock<BTreeMap<String, OrderRecord>>,
}

impl MemoryOrderStore {
    /// Create a store seeded with the fixed demo dataset
    pub fn seeded() -> Self {
        let mut orders = BTreeMap::new();
        for order in demo_orders() {
            orders.insert(order.id.clone(), order);
        }
        Self {
            orders: RwLock::new(orders),
        }
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn get(&self, id: &str) -> Option<OrderRecord> {
        self.orders.read().await.get(id).cloned()
    }

    async fn list(&self) -> Vec<OrderRecord> {
        self.orders.read().await.values().cloned().collect()
    }

    async fn advance(&self, id: &str) -> Result<AdvanceOutcome> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("Unknown order: {}", id)))?;

        let next = order.status.advanced();
        let changed = next != order.status;
        order.status = next;

        Ok(AdvanceOutcome {
            order: order.clone(),
            changed,
        })
    }
}

/// The fixed demo dataset seeded at startup
fn demo_orders() -> Vec<OrderRecord> {
    fn order(
        id: &str,
        status: OrderStatus,
        origin: (f64, f64),
        origin_name: &str,
        dest: (f64, f64),
        dest_name: &str,
    ) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            status,
            origin: LatLng::new(origin.0, origin.1),
            dest: LatLng::new(dest.0, dest.1),
            origin_name: Some(origin_name.to_string()),
            dest_name: Some(dest_name.to_string()),
        }
    }

    vec![
        order(
            "ORD1001",
            OrderStatus::Processing,
            (40.7128, -74.0060),
            "New York, NY",
            (34.0522, -118.2437),
            "Los Angeles, CA",
        ),
        order(
            "ORD1002",
            OrderStatus::Packed,
            (41.8781, -87.6298),
            "Chicago, IL",
            (29.7604, -95.3698),
            "Houston, TX",
        ),
        order(
            "ORD1003",
            OrderStatus::Shipped,
            (47.6062, -122.3321),
            "Seattle, WA",
            (25.7617, -80.1918),
            "Miami, FL",
        ),
        order(
            "ORD1004",
            OrderStatus::InTransit,
            (39.7392, -104.9903),
            "Denver, CO",
            (33.4484, -112.0740),
            "Phoenix, AZ",
        ),
        order(
            "ORD1005",
            OrderStatus::OutForDelivery,
            (42.3601, -71.0589),
            "Boston, MA",
            (38.9072, -77.0369),
            "Washington, DC",
        ),
        order(
            "ORD1006",
            OrderStatus::Delivered,
            (37.7749, -122.4194),
            "San Francisco, CA",
            (45.5152, -122.6784),
            "Portland, OR",
        ),
        order(
            "ORD1007",
            OrderStatus::Canceled,
            (32.7767, -96.7970),
            "Dallas, TX",
            (36.1627, -86.7816),
            "Nashville, TN",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_orders_have_bounded_progress() {
        let store = MemoryOrderStore::seeded();
        let orders = store.list().await;
        assert!(!orders.is_empty());
        for order in orders {
            assert!(order.progress() <= 100);
            assert!(OrderStatus::parse(order.status.as_str()).is_some());
        }
    }

    #[tokio::test]
    async fn advance_steps_one_stage() {
        let store = MemoryOrderStore::seeded();
        let outcome = store.advance("ORD1001").await.unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.order.status, OrderStatus::Packed);
        // The mutation is visible on subsequent reads
        let order = store.get("ORD1001").await.unwrap();
        assert_eq!(order.status, OrderStatus::Packed);
    }

    #[tokio::test]
    async fn advance_delivered_reports_unchanged() {
        let store = MemoryOrderStore::seeded();
        let outcome = store.advance("ORD1006").await.unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.order.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn advance_unknown_order_is_not_found() {
        let store = MemoryOrderStore::seeded();
        let err = store.advance("ORD9999").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn out_for_delivery_advances_to_delivered() {
        let store = MemoryOrderStore::seeded();
        let outcome = store.advance("ORD1005").await.unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.order.status, OrderStatus::Delivered);
    }
}
