//! Universal tracking lookup
//!
//! Resolution order for POST /api/track-any:
//! 1. demo order id
//! 2. explicit `carrier:code` query through the tracking provider
//! 3. carrier auto-detect on the bare code
//! 4. official-site deep link when no tracking provider is configured
//!
//! A code matching no known pattern with no provider key is a 404.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use shiptrack_common::api::TrackAnyRequest;

use super::track::track_response;
use super::ApiError;
use crate::providers::CarrierShipment;
use crate::AppState;

fn carrier_result(shipment: &CarrierShipment) -> Value {
    json!({
        "kind": "carrier",
        "carrier": shipment.carrier,
        "code": shipment.code,
        "status": shipment.status,
        "progress": shipment.progress,
        "current": shipment.current,
        "lastCheckpoint": shipment.last_checkpoint,
    })
}

/// POST /api/track-any with `{"query": "..."}`
pub async fn track_any(
    State(state): State<AppState>,
    Json(request): Json<TrackAnyRequest>,
) -> Result<Json<Value>, ApiError> {
    let query = request.query.trim().to_string();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Missing query".to_string()));
    }

    // 1. Demo order lookup
    if let Some(order) = state.orders.get(&query).await {
        let mut value = serde_json::to_value(track_response(&order))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        value["kind"] = json!("order");
        return Ok(Json(value));
    }

    // 2. Explicit carrier:code query
    if let Some((carrier, code)) = query.split_once(':') {
        let carrier = carrier.trim().to_lowercase();
        let code = code.trim();
        if !state.detect.knows_carrier(&carrier) {
            return Err(ApiError::BadRequest(format!(
                "Unknown carrier: {}",
                carrier
            )));
        }
        let Some(tracking) = &state.tracking else {
            return Err(ApiError::NotConfigured(
                "Tracking provider not configured".to_string(),
            ));
        };
        let shipment = tracking.track(&carrier, code).await?;
        return Ok(Json(carrier_result(&shipment)));
    }

    // 3. Carrier auto-detect on the bare code
    if let Some(pattern) = state.detect.detect(&query) {
        if let Some(tracking) = &state.tracking {
            let shipment = tracking.track(pattern.slug, &query).await?;
            return Ok(Json(carrier_result(&shipment)));
        }
        // 4. Official link fallback without a provider key
        return Ok(Json(json!({
            "kind": "link",
            "carrier": pattern.display,
            "code": query,
            "link": pattern.official_link(&query),
            "note": "Tracking provider not configured; use the carrier's official page",
        })));
    }

    Err(ApiError::NotFound(format!(
        "No known link format for: {}",
        query
    )))
}
