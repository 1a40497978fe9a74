//! Order status vocabulary and progress mapping
//!
//! The status set is fixed. The forward sequence is:
//! Processing → Packed → Shipped → In Transit → Out for Delivery → Delivered.
//! Canceled and Returned are terminal dead-ends never produced by `advance`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of order statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Packed,
    Shipped,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Canceled,
    Returned,
}

/// Progress fallback for statuses missing from the mapping table
pub const DEFAULT_PROGRESS: u8 = 50;

/// The forward advance sequence (terminal statuses excluded)
const ADVANCE_SEQUENCE: [OrderStatus; 6] = [
    OrderStatus::Processing,
    OrderStatus::Packed,
    OrderStatus::Shipped,
    OrderStatus::InTransit,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

impl OrderStatus {
    /// All statuses, including terminal dead-ends
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Processing,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::InTransit,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
        OrderStatus::Returned,
    ];

    /// Display name matching the JSON wire form ("In Transit", not "InTransit")
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Canceled => "Canceled",
            OrderStatus::Returned => "Returned",
        }
    }

    /// Parse a status from its display form (case-insensitive)
    pub fn parse(s: &str) -> Option<OrderStatus> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
    }

    /// Static status → progress percentage table
    pub fn progress(&self) -> u8 {
        match self {
            OrderStatus::Processing => 5,
            OrderStatus::Packed => 15,
            OrderStatus::Shipped => 35,
            OrderStatus::InTransit => 60,
            OrderStatus::OutForDelivery => 85,
            OrderStatus::Delivered => 100,
            OrderStatus::Canceled => 0,
            OrderStatus::Returned => 0,
        }
    }

    /// Next status in the forward sequence.
    ///
    /// Delivered is a fixed point. Canceled and Returned are not part of
    /// the sequence and also return themselves.
    pub fn advanced(&self) -> OrderStatus {
        let Some(pos) = ADVANCE_SEQUENCE.iter().position(|s| s == self) else {
            return *self;
        };
        ADVANCE_SEQUENCE[(pos + 1).min(ADVANCE_SEQUENCE.len() - 1)]
    }

    /// True for statuses that `advanced()` will not move past
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Canceled | OrderStatus::Returned
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_full_sequence() {
        let mut status = OrderStatus::Processing;
        let expected = [
            OrderStatus::Packed,
            OrderStatus::Shipped,
            OrderStatus::InTransit,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ];
        for want in expected {
            status = status.advanced();
            assert_eq!(status, want);
        }
    }

    #[test]
    fn advance_delivered_is_noop() {
        assert_eq!(OrderStatus::Delivered.advanced(), OrderStatus::Delivered);
    }

    #[test]
    fn advance_out_for_delivery_yields_delivered() {
        assert_eq!(
            OrderStatus::OutForDelivery.advanced(),
            OrderStatus::Delivered
        );
    }

    #[test]
    fn dead_end_statuses_never_advance() {
        assert_eq!(OrderStatus::Canceled.advanced(), OrderStatus::Canceled);
        assert_eq!(OrderStatus::Returned.advanced(), OrderStatus::Returned);
    }

    #[test]
    fn progress_is_bounded() {
        for status in OrderStatus::ALL {
            assert!(status.progress() <= 100);
        }
    }

    #[test]
    fn parse_round_trips_display_names() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("in transit"), Some(OrderStatus::InTransit));
        assert_eq!(OrderStatus::parse("Lost"), None);
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out for Delivery\"");
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::OutForDelivery);
    }
}
