//! # Shiptrack Common Library
//!
//! Shared code for the shiptrack order-tracking demo:
//! - Order status vocabulary and progress mapping
//! - Geographic primitives (lat/lng, interpolation, demo polyline)
//! - API request/response types
//! - Configuration loading
//! - Common error types

pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod order;

pub use error::{Error, Result};
pub use geo::LatLng;
pub use order::{OrderStatus, DEFAULT_PROGRESS};
