//! One-shot room bootstrap for mobile/embedded clients.
//!
//! Composes the three control-plane pieces: create the room, register an
//! agent for it, and issue a join token for the end user. Any failure stops
//! the sequence and surfaces unchanged; steps already taken are not rolled
//! back.

use crate::{api::ApiError, AppState};
use axum::{extract::Extension, Json};
use chorus_livekit::token::{generate_room_name, generate_user_identity};
use chorus_livekit::{CreateRoomParams, TokenGrants};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Request body for room initialization. Room name and identity are
/// generated when omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRoomRequest {
    pub room_name: Option<String>,
    pub identity: Option<String>,
    pub system_prompt: String,
}

/// Response body carrying everything a client needs to join.
#[derive(Debug, Serialize, Deserialize)]
pub struct InitializeRoomResponse {
    pub success: bool,
    pub room: RoomSummary,
    pub identity: String,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomSummary {
    pub name: String,
    pub sid: String,
}

/// Handler for `POST /api/initialize-room`.
pub async fn initialize_room_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<InitializeRoomRequest>,
) -> Result<Json<InitializeRoomResponse>, ApiError> {
    let room_name = payload
        .room_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(generate_room_name);
    let identity = payload
        .identity
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_user_identity);
    info!(room = %room_name, identity = %identity, "initialize room request");

    let room = state
        .rooms
        .create_room(&room_name, CreateRoomParams::default())
        .await?;

    state.agents.attach(&room_name, &payload.system_prompt);

    let token = state
        .tokens
        .issue(&identity, &room_name, TokenGrants::join_only(), None)?;

    Ok(Json(InitializeRoomResponse {
        success: true,
        room: RoomSummary {
            name: room_name,
            sid: room.sid,
        },
        identity,
        token,
        message: "Room initialized with agent".to_owned(),
    }))
}
