//! Informational/demo endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shiptrack_common::OrderStatus;
use std::collections::BTreeMap;

use super::track::track_response;
use super::ApiError;
use crate::store::OrderRecord;
use crate::AppState;

fn order_summary(order: &OrderRecord) -> Value {
    json!({
        "orderId": order.id,
        "status": order.status,
        "progress": order.progress(),
        "originName": order.origin_name,
        "destName": order.dest_name,
    })
}

/// GET /api/config
///
/// Which optional providers are configured, so the UI can hide the
/// features that would only answer "not configured".
pub async fn get_config(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "providers": {
            "carrier": state.tracking.is_some(),
            "ai": state.completion.is_some(),
            "mail": state.mail.is_some(),
            "gmail": state.gmail.is_some(),
        },
    }))
}

/// GET /api/analytics
pub async fn get_analytics(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let orders = state.orders.list().await;
    let mut by_status: BTreeMap<&'static str, usize> = BTreeMap::new();
    for order in &orders {
        *by_status.entry(order.status.as_str()).or_default() += 1;
    }

    let subscription_count = state.subscriptions.count().await?;

    Ok(Json(json!({
        "totalOrders": orders.len(),
        "byStatus": by_status,
        "subscriptionCount": subscription_count,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/search?q=...
///
/// Case-insensitive substring match over order ids and place names.
pub async fn search_orders(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let needle = query
        .q
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing q".to_string()))?;

    let matches: Vec<Value> = state
        .orders
        .list()
        .await
        .iter()
        .filter(|order| {
            order.id.to_lowercase().contains(&needle)
                || order
                    .origin_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
                || order
                    .dest_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
        .map(order_summary)
        .collect();

    Ok(Json(json!({ "results": matches })))
}

/// GET /api/orders
pub async fn list_orders(State(state): State<AppState>) -> Json<Value> {
    let orders: Vec<Value> = state.orders.list().await.iter().map(order_summary).collect();
    Json(json!({ "orders": orders }))
}

/// GET /api/orders/:order_id
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let order = state
        .orders
        .get(&order_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Unknown order: {}", order_id)))?;
    serde_json::to_value(track_response(&order))
        .map(Json)
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// GET /api/eta/:order_id
///
/// Synthesizes a demo ETA from remaining progress (one "day" per 20%).
/// Terminal statuses have no ETA.
pub async fn get_eta(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let order = state
        .orders
        .get(&order_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Unknown order: {}", order_id)))?;

    let eta_days: Option<u8> = match order.status {
        OrderStatus::Delivered => Some(0),
        OrderStatus::Canceled | OrderStatus::Returned => None,
        _ => {
            let remaining = 100u16.saturating_sub(u16::from(order.progress()));
            Some(((remaining + 19) / 20) as u8)
        }
    };

    Ok(Json(json!({
        "orderId": order.id,
        "status": order.status,
        "progress": order.progress(),
        "etaDays": eta_days,
        "note": if eta_days.is_none() { Some("No delivery expected for this status") } else { None },
    })))
}

/// GET /api/returns
pub async fn get_returns_policy() -> Json<Value> {
    Json(json!({
        "policy": "Returns are accepted within 30 days of delivery.",
        "steps": [
            "Request a return label via support",
            "Pack the item in its original packaging",
            "Drop the parcel at any carrier location",
        ],
        "refundDays": 30,
    }))
}
