//! Order tracking endpoints
//!
//! Returns status, progress, route (origin/dest/current position), and the
//! cosmetic polyline for one demo order. 400 when no id is given, 404 for
//! unknown ids.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shiptrack_common::api::{RouteInfo, TrackRequest, TrackResponse};
use shiptrack_common::geo;

use super::ApiError;
use crate::store::OrderRecord;
use crate::AppState;

/// Build the track response for an order record
pub fn track_response(order: &OrderRecord) -> TrackResponse {
    TrackResponse {
        order_id: order.id.clone(),
        status: order.status,
        progress: order.progress(),
        route: RouteInfo {
            origin: order.origin,
            dest: order.dest,
            current: order.current_position(),
            origin_name: order.origin_name.clone(),
            dest_name: order.dest_name.clone(),
        },
        polyline: geo::demo_polyline(order.origin, order.dest),
    }
}

async fn lookup(state: &AppState, order_id: &str) -> Result<Json<TrackResponse>, ApiError> {
    let order = state
        .orders
        .get(order_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Unknown order: {}", order_id)))?;
    Ok(Json(track_response(&order)))
}

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
}

/// GET /api/track?orderId=...
pub async fn track_query(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<TrackResponse>, ApiError> {
    let order_id = query
        .order_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing orderId".to_string()))?;
    lookup(&state, order_id.trim()).await
}

/// GET /api/track/:order_id
pub async fn track_by_path(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<TrackResponse>, ApiError> {
    lookup(&state, order_id.trim()).await
}

/// POST /api/track with `{"orderId": "..."}`
pub async fn track_post(
    State(state): State<AppState>,
    Json(request): Json<TrackRequest>,
) -> Result<Json<TrackResponse>, ApiError> {
    let order_id = request
        .order_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing orderId".to_string()))?;
    lookup(&state, order_id.trim()).await
}
