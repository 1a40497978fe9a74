//! Status-update subscriptions
//!
//! Appends to the flat subscription file (duplicates allowed) and attempts
//! a confirmation email. The order id is not required to exist; dangling
//! subscriptions simply never fire.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use shiptrack_common::api::SubscribeRequest;

use super::ApiError;
use crate::notify;
use crate::AppState;

/// POST /api/subscribe with `{"orderId": "...", "email": "..."}`
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<Value>, ApiError> {
    let order_id = request.order_id.trim();
    let email = request.email.trim();

    if order_id.is_empty() {
        return Err(ApiError::BadRequest("Missing orderId".to_string()));
    }
    // Shallow shape check only; the mail relay is the real validator
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }

    let record = state.subscriptions.append(order_id, email).await?;

    let confirmation = if state.mail.is_some() {
        if notify::send_confirmation(&state, order_id, email).await {
            "sent"
        } else {
            "unavailable"
        }
    } else {
        "not configured"
    };

    Ok(Json(json!({
        "subscribed": true,
        "orderId": record.order_id,
        "email": record.email,
        "subscribedAt": record.subscribed_at,
        "confirmation": confirmation,
    })))
}
