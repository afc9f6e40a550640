//! Shared API error type and request validation helpers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chorus_livekit::LiveKitError;
use thiserror::Error;
use tracing::error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<LiveKitError> for ApiError {
    fn from(err: LiveKitError) -> Self {
        match err {
            // Generic message on purpose: the response must not hint at
            // which half of the credential pair is missing.
            LiveKitError::MissingCredentials => {
                error!("request rejected: LiveKit credentials are not configured");
                ApiError::InternalServerError("LiveKit credentials are not configured".to_owned())
            }
            LiveKitError::Token(e) => {
                ApiError::InternalServerError(format!("token signing failed: {e}"))
            }
            LiveKitError::RoomService(e) => {
                ApiError::InternalServerError(format!("room service call failed: {e}"))
            }
            LiveKitError::Webhook(_) => ApiError::BadRequest("invalid webhook payload".to_owned()),
        }
    }
}

/// Rejects blank route parameters and body fields before any remote call.
pub fn require_param(value: &str, name: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{name} must not be empty")));
    }
    Ok(())
}
