//! Room and participant management handlers.
//!
//! Thin forwarding to the room façade: handlers validate route parameters,
//! fill nothing in themselves, and surface platform errors unchanged as
//! 500s. Room and participant state lives on the LiveKit side only.

use crate::{api::require_param, api::ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    Json,
};
use chorus_livekit::{CreateRoomParams, PermissionUpdate};
use livekit_protocol::{ParticipantInfo, Room};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Request body for room creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    pub empty_timeout: Option<u32>,
    pub max_participants: Option<u32>,
}

/// Request body for a participant metadata update.
#[derive(Debug, Deserialize)]
pub struct UpdateMetadataRequest {
    pub metadata: String,
}

/// Request body for a track mute toggle.
#[derive(Debug, Deserialize)]
pub struct MuteTrackRequest {
    pub muted: bool,
}

/// Handler for `GET /api/rooms`.
pub async fn list_rooms_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = state.rooms.list_rooms().await?;
    Ok(Json(rooms))
}

/// Handler for `POST /api/rooms`.
pub async fn create_room_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    require_param(&payload.name, "name")?;
    info!(room = %payload.name, "create room request");

    let room = state
        .rooms
        .create_room(
            &payload.name,
            CreateRoomParams {
                empty_timeout: payload.empty_timeout,
                max_participants: payload.max_participants,
            },
        )
        .await?;
    Ok(Json(room))
}

/// Handler for `DELETE /api/rooms/{roomName}`.
pub async fn delete_room_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    require_param(&room_name, "roomName")?;
    state.rooms.delete_room(&room_name).await?;
    Ok(Json(json!({ "success": true, "room": room_name })))
}

/// Handler for `GET /api/rooms/{roomName}/participants`.
pub async fn list_participants_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<Vec<ParticipantInfo>>, ApiError> {
    require_param(&room_name, "roomName")?;
    let participants = state.rooms.list_participants(&room_name).await?;
    Ok(Json(participants))
}

/// Handler for `GET /api/rooms/{roomName}/participants/{identity}`.
pub async fn get_participant_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((room_name, identity)): Path<(String, String)>,
) -> Result<Json<ParticipantInfo>, ApiError> {
    require_param(&room_name, "roomName")?;
    require_param(&identity, "identity")?;
    let participant = state.rooms.get_participant(&room_name, &identity).await?;
    Ok(Json(participant))
}

/// Handler for `PATCH /api/rooms/{roomName}/participants/{identity}/permissions`.
pub async fn update_permissions_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((room_name, identity)): Path<(String, String)>,
    Json(permissions): Json<PermissionUpdate>,
) -> Result<Json<ParticipantInfo>, ApiError> {
    require_param(&room_name, "roomName")?;
    require_param(&identity, "identity")?;
    let updated = state
        .rooms
        .update_participant_permissions(&room_name, &identity, permissions)
        .await?;
    Ok(Json(updated))
}

/// Handler for `PATCH /api/rooms/{roomName}/participants/{identity}/metadata`.
pub async fn update_metadata_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((room_name, identity)): Path<(String, String)>,
    Json(payload): Json<UpdateMetadataRequest>,
) -> Result<Json<ParticipantInfo>, ApiError> {
    require_param(&room_name, "roomName")?;
    require_param(&identity, "identity")?;
    let updated = state
        .rooms
        .update_participant_metadata(&room_name, &identity, &payload.metadata)
        .await?;
    Ok(Json(updated))
}

/// Handler for `DELETE /api/rooms/{roomName}/participants/{identity}`.
pub async fn remove_participant_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((room_name, identity)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    require_param(&room_name, "roomName")?;
    require_param(&identity, "identity")?;
    state.rooms.remove_participant(&room_name, &identity).await?;
    Ok(Json(json!({ "success": true, "identity": identity })))
}

/// Handler for `PATCH /api/rooms/{roomName}/participants/{identity}/tracks/{trackSid}`.
pub async fn mute_track_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((room_name, identity, track_sid)): Path<(String, String, String)>,
    Json(payload): Json<MuteTrackRequest>,
) -> Result<Json<Value>, ApiError> {
    require_param(&room_name, "roomName")?;
    require_param(&identity, "identity")?;
    require_param(&track_sid, "trackSid")?;
    state
        .rooms
        .mute_published_track(&room_name, &identity, &track_sid, payload.muted)
        .await?;
    Ok(Json(json!({
        "success": true,
        "trackSid": track_sid,
        "muted": payload.muted
    })))
}
