//! Live status over Server-Sent Events
//!
//! One JSON snapshot of the order every 10 seconds until the client
//! disconnects. No fan-out and no delivery guarantees: a missed snapshot
//! is simply superseded by the next one.

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, info};

use super::track::track_response;
use super::ApiError;
use crate::AppState;

/// Interval between status snapshots
const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(10);

/// GET /api/stream/:order_id
///
/// Sends an immediate snapshot on connect, then one every 10 seconds.
/// Unknown order ids are rejected with 404 before the stream starts.
pub async fn stream_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    if state.orders.get(&order_id).await.is_none() {
        return Err(ApiError::NotFound(format!("Unknown order: {}", order_id)));
    }

    info!(order_id = %order_id, "SSE client connected");

    let stream = async_stream::stream! {
        loop {
            match state.orders.get(&order_id).await {
                Some(order) => {
                    let snapshot = track_response(&order);
                    match serde_json::to_string(&snapshot) {
                        Ok(data) => yield Ok(Event::default().event("status").data(data)),
                        Err(e) => debug!("Skipping unserializable snapshot: {}", e),
                    }
                }
                // Orders are never deleted; treat a miss as a skipped tick
                None => debug!(order_id = %order_id, "Order vanished mid-stream"),
            }
            tokio::time::sleep(SNAPSHOT_INTERVAL).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    ))
}
