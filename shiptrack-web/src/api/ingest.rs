//! Tracking-code ingestion
//!
//! Extracts candidate tracking codes from raw text (pasted email bodies or
//! Gmail snippets) via the carrier pattern table and resolves each through
//! the provider when configured, otherwise to an official link.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub raw: String,
}

/// Resolve one extracted code: provider lookup when available, official
/// link otherwise. Per-code provider failures become inline notes so one
/// bad code does not sink the batch.
async fn resolve_candidate(state: &AppState, code: &str) -> Value {
    let Some(pattern) = state.detect.detect(code) else {
        return json!({ "code": code, "resolved": false, "note": "No known link format" });
    };

    if let Some(tracking) = &state.tracking {
        match tracking.track(pattern.slug, code).await {
            Ok(shipment) => {
                return json!({
                    "code": code,
                    "resolved": true,
                    "carrier": shipment.carrier,
                    "status": shipment.status,
                    "progress": shipment.progress,
                    "current": shipment.current,
                })
            }
            Err(e) => {
                warn!(code = %code, "Carrier lookup failed during ingest: {}", e);
                return json!({
                    "code": code,
                    "resolved": false,
                    "carrier": pattern.display,
                    "note": "Carrier lookup unavailable",
                    "link": pattern.official_link(code),
                });
            }
        }
    }

    json!({
        "code": code,
        "resolved": false,
        "carrier": pattern.display,
        "note": "Tracking provider not configured",
        "link": pattern.official_link(code),
    })
}

async fn resolve_all(state: &AppState, text: &str) -> Vec<Value> {
    let mut results = Vec::new();
    for code in state.detect.extract_candidates(text) {
        results.push(resolve_candidate(state, &code).await);
    }
    results
}

/// POST /api/ingest-email with `{"raw": "..."}`
pub async fn ingest_email(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.raw.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing raw text".to_string()));
    }

    let candidates = resolve_all(&state, &request.raw).await;
    Ok(Json(json!({ "candidates": candidates })))
}

/// GET /api/gmail/scan
///
/// Scans recent Gmail snippets for tracking codes. 501 when Gmail OAuth
/// credentials are not configured.
pub async fn gmail_scan(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let Some(gmail) = &state.gmail else {
        return Err(ApiError::NotConfigured(
            "Gmail scan not configured".to_string(),
        ));
    };

    let snippets = gmail.scan_snippets().await?;
    let text = snippets.join("\n");
    let candidates = resolve_all(&state, &text).await;

    Ok(Json(json!({
        "scanned": snippets.len(),
        "candidates": candidates,
    })))
}
