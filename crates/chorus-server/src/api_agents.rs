//! Agent registry handlers.
//!
//! The registry records which rooms expect a voice agent; the agent runtime
//! itself is the LiveKit worker system's concern. All operations here are
//! local map accesses, so handlers never fail beyond input validation.

use crate::{api::require_param, api::ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    Json,
};
use chorus_livekit::AgentRegistration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Request body for agent registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachAgentRequest {
    pub room_name: String,
    pub system_prompt: String,
}

/// Response body for agent registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttachAgentResponse {
    pub success: bool,
    pub message: String,
}

/// Response body for the registry listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListAgentsResponse {
    pub success: bool,
    pub agents: Vec<String>,
    pub details: HashMap<String, AgentRegistration>,
}

/// Response body for a single-room registration check.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatusResponse {
    pub success: bool,
    pub exists: bool,
    pub room_name: String,
}

/// Response body for a registration removal.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAgentResponse {
    pub success: bool,
    pub removed: bool,
    pub room_name: String,
}

/// Handler for `POST /api/agents/attach` (alias: `/api/agents/create`).
pub async fn attach_agent_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<AttachAgentRequest>,
) -> Result<Json<AttachAgentResponse>, ApiError> {
    require_param(&payload.room_name, "roomName")?;
    info!(room = %payload.room_name, "attach agent request");

    state
        .agents
        .attach(&payload.room_name, &payload.system_prompt);

    Ok(Json(AttachAgentResponse {
        success: true,
        message: format!("Agent attached to room {}", payload.room_name),
    }))
}

/// Handler for `GET /api/agents/list`.
pub async fn list_agents_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<ListAgentsResponse> {
    Json(ListAgentsResponse {
        success: true,
        agents: state.agents.list(),
        details: state.agents.details(),
    })
}

/// Handler for `GET /api/agents/{roomName}`.
pub async fn get_agent_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<AgentStatusResponse>, ApiError> {
    require_param(&room_name, "roomName")?;
    Ok(Json(AgentStatusResponse {
        success: true,
        exists: state.agents.get(&room_name).is_some(),
        room_name,
    }))
}

/// Handler for `DELETE /api/agents/{roomName}`.
pub async fn remove_agent_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<RemoveAgentResponse>, ApiError> {
    require_param(&room_name, "roomName")?;
    let removed = state.agents.remove(&room_name);
    Ok(Json(RemoveAgentResponse {
        success: true,
        removed,
        room_name,
    }))
}
