//! Demo admin controls
//!
//! The advance endpoint is the only mutation in the system: it steps an
//! order one stage through the fixed status sequence and notifies
//! subscribers by email (best effort).

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::ApiError;
use crate::notify;
use crate::AppState;

/// POST /api/admin/advance/:order_id
pub async fn advance_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.orders.advance(&order_id).await?;
    info!(
        order_id = %order_id,
        status = %outcome.order.status,
        changed = outcome.changed,
        "Admin advance"
    );

    // Only an actual status change is worth an email
    let notified = if outcome.changed {
        notify::notify_subscribers(&state, &outcome.order).await
    } else {
        0
    };

    Ok(Json(json!({
        "orderId": outcome.order.id,
        "status": outcome.order.status,
        "progress": outcome.order.progress(),
        "changed": outcome.changed,
        "notified": notified,
    })))
}
