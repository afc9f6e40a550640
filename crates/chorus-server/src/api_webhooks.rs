//! LiveKit webhook endpoint.
//!
//! The platform pushes lifecycle events here with a signed `Authorization`
//! credential over the raw body. The header is required before any
//! verification work; once the payload verifies, the response is success no
//! matter what the individual handler does.

use crate::{api::ApiError, AppState};
use axum::{
    extract::Extension,
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Handler for `POST /webhooks/livekit`.
pub async fn livekit_webhook_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let auth_token = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".to_owned()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed Authorization header".to_owned()))?;

    let event = state.webhooks.receive(&body, auth_token)?;
    info!(kind = %event.event, "webhook event verified");

    state.webhooks.dispatch(&event);
    Ok(Json(json!({ "success": true })))
}
