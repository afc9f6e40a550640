//! Access-token API handlers.
//!
//! The plain token routes return the signed JWT as `text/plain` and issue
//! join-only grants; the playground route returns JSON and issues full
//! publish/subscribe/data grants for interactive clients.

use crate::{api::require_param, api::ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    Json,
};
use chorus_livekit::token::{generate_identity, generate_room_name};
use chorus_livekit::TokenGrants;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Response body for the playground token endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundTokenResponse {
    pub identity: String,
    pub access_token: String,
    pub room: String,
}

/// Handler for `GET /livekit/token`.
///
/// Issues a token for a generated placeholder identity and room, for
/// anonymous/dev flows where the caller did not ask for anything specific.
pub async fn default_token_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<String, ApiError> {
    let identity = generate_identity();
    let room = generate_room_name();
    info!(%identity, %room, "default token request");

    let token = state
        .tokens
        .issue(&identity, &room, TokenGrants::join_only(), None)?;
    Ok(token)
}

/// Handler for `GET /livekit/token/{room}/{identity}`.
pub async fn scoped_token_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((room, identity)): Path<(String, String)>,
) -> Result<String, ApiError> {
    require_param(&room, "room")?;
    require_param(&identity, "identity")?;
    info!(%identity, %room, "scoped token request");

    let token = state
        .tokens
        .issue(&identity, &room, TokenGrants::join_only(), None)?;
    Ok(token)
}

/// Handler for `GET /livekit/playground-token`.
pub async fn playground_token_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<PlaygroundTokenResponse>, ApiError> {
    let identity = generate_identity();
    let room = generate_room_name();
    info!(%identity, %room, "playground token request");

    let access_token = state
        .tokens
        .issue(&identity, &room, TokenGrants::full(), None)?;

    Ok(Json(PlaygroundTokenResponse {
        identity,
        access_token,
        room,
    }))
}
