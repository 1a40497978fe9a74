//! Chat endpoint
//!
//! Classifies the message with the regex rules, builds any tracking
//! context, then relays through the AI completion provider when one is
//! configured. A failed AI call falls back to the rules reply; the
//! endpoint itself never surfaces provider errors.

use axum::{extract::State, Json};
use shiptrack_common::api::{ChatRequest, ChatResponse};
use tracing::warn;

use super::ApiError;
use crate::chat::{canned_reply, Intent};
use crate::AppState;

const SYSTEM_PROMPT: &str = "You are the support assistant for a demo order-tracking site. \
Answer briefly and factually. When shipment status context is provided, base your answer on it.";

/// Resolve extracted ids/codes to a one-line status summary
async fn tracking_context(state: &AppState, intent: &Intent) -> Option<String> {
    match intent {
        Intent::OrderId(id) => {
            let order = state.orders.get(id).await?;
            Some(format!(
                "Order {} is \"{}\" ({}% complete), traveling from {} to {}.",
                order.id,
                order.status,
                order.progress(),
                order.origin_name.as_deref().unwrap_or("origin"),
                order.dest_name.as_deref().unwrap_or("destination"),
            ))
        }
        Intent::CarrierCode { carrier, code } => {
            let tracking = state.tracking.as_ref()?;
            match tracking.track(carrier, code).await {
                Ok(shipment) => Some(format!(
                    "{} shipment {} is \"{}\" ({}%).{}",
                    shipment.carrier.to_uppercase(),
                    shipment.code,
                    shipment.status,
                    shipment.progress,
                    shipment
                        .last_checkpoint
                        .map(|cp| format!(" Last checkpoint: {}.", cp))
                        .unwrap_or_default(),
                )),
                Err(e) => {
                    warn!(carrier = %carrier, code = %code, "Carrier lookup for chat failed: {}", e);
                    None
                }
            }
        }
        _ => None,
    }
}

/// POST /api/chat with `{"message": "..."}`
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Missing message".to_string()));
    }

    let intent = state.intents.classify(message);
    let context = tracking_context(&state, &intent).await;

    if let Some(completion) = &state.completion {
        let user = match &context {
            Some(ctx) => format!("{}\n\n[Shipment status context: {}]", message, ctx),
            None => message.to_string(),
        };
        match completion.complete(SYSTEM_PROMPT, &user).await {
            Ok(reply) => {
                return Ok(Json(ChatResponse {
                    reply,
                    source: "ai".to_string(),
                }))
            }
            Err(e) => warn!("Completion provider failed, using rules reply: {}", e),
        }
    }

    Ok(Json(ChatResponse {
        reply: canned_reply(&intent, context.as_deref()),
        source: "rules".to_string(),
    }))
}
