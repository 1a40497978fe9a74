//! Geographic primitives for the demo map
//!
//! Positions are plain WGS84 lat/lng pairs. The "current position" of a
//! shipment is synthesized by linear interpolation between origin and
//! destination at the order's progress percentage. The polyline is a
//! cosmetic 3-point curve, not a routing computation.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Linear interpolation between origin and destination at `progress` percent.
///
/// Progress is clamped to [0,100]; 0 returns the origin, 100 the destination.
pub fn position_at(origin: LatLng, dest: LatLng, progress: u8) -> LatLng {
    match progress {
        0 => origin,
        p if p >= 100 => dest,
        p => {
            let t = f64::from(p) / 100.0;
            LatLng {
                lat: origin.lat + (dest.lat - origin.lat) * t,
                lng: origin.lng + (dest.lng - origin.lng) * t,
            }
        }
    }
}

/// Fixed 3-point demo polyline: origin, artificially bowed midpoint,
/// destination. The bow offsets the midpoint perpendicular-ish to the
/// straight line so the route reads as a curve on the map.
pub fn demo_polyline(origin: LatLng, dest: LatLng) -> Vec<LatLng> {
    let mid = position_at(origin, dest, 50);
    let bow = LatLng {
        lat: mid.lat + (dest.lng - origin.lng) * 0.08,
        lng: mid.lng - (dest.lat - origin.lat) * 0.08,
    };
    vec![origin, bow, dest]
}
