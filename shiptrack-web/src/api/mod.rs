//! HTTP API handlers for shiptrack-web

pub mod admin;
pub mod chat;
pub mod health;
pub mod info;
pub mod ingest;
pub mod stream;
pub mod subscribe;
pub mod track;
pub mod track_any;
pub mod ui;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shiptrack_common::Error;

/// API error with the status mapping shared by every handler:
/// validation 400, not-found 404, unconfigured provider 501, upstream
/// failure 502, everything else 500.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    NotConfigured(String),
    Upstream(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::NotConfigured(msg) => ApiError::NotConfigured(msg),
            Error::Upstream(msg) => ApiError::Upstream(msg),
            Error::Config(msg) => ApiError::Internal(msg),
            Error::Io(e) => ApiError::Internal(e.to_string()),
            Error::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::NotConfigured(msg) => (StatusCode::NOT_IMPLEMENTED, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            // Internal details stay in the log, not the response
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
