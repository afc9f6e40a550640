//! Chorus server library logic.
//!
//! Composes the LiveKit control-plane services from `chorus-livekit` into an
//! axum router. Handlers own request validation and response shaping;
//! everything stateful or remote lives in the library crate.

pub mod api;
pub mod api_agents;
pub mod api_bootstrap;
pub mod api_rooms;
pub mod api_tokens;
pub mod api_webhooks;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use chorus_livekit::{
    AgentRegistry, LiveKitConfig, RoomControl, RoomManager, TokenIssuer, WebhookDispatcher,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all request handlers.
///
/// Constructed once at startup and injected by reference; nothing in here
/// is a process-global. The room façade sits behind `dyn RoomControl` so
/// tests can build the router against a local fake.
#[derive(Clone)]
pub struct AppState {
    /// Room/participant management façade.
    pub rooms: Arc<dyn RoomControl>,
    /// Access-token issuer.
    pub tokens: Arc<TokenIssuer>,
    /// In-memory voice-agent registry.
    pub agents: Arc<AgentRegistry>,
    /// Webhook verifier/dispatcher.
    pub webhooks: Arc<WebhookDispatcher>,
}

impl AppState {
    /// Wires up the production services from a single LiveKit configuration.
    pub fn from_livekit_config(config: LiveKitConfig) -> Self {
        Self {
            rooms: Arc::new(RoomManager::new(config.clone())),
            tokens: Arc::new(TokenIssuer::new(config.clone())),
            agents: Arc::new(AgentRegistry::new()),
            webhooks: Arc::new(WebhookDispatcher::new(&config)),
        }
    }
}

/// Maximum request body size (2 MiB). Protects against OOM from oversized payloads.
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/livekit/token", get(api_tokens::default_token_handler))
        .route(
            "/livekit/token/{room}/{identity}",
            get(api_tokens::scoped_token_handler),
        )
        .route(
            "/livekit/playground-token",
            get(api_tokens::playground_token_handler),
        )
        .route(
            "/api/rooms",
            get(api_rooms::list_rooms_handler).post(api_rooms::create_room_handler),
        )
        .route("/api/rooms/{roomName}", delete(api_rooms::delete_room_handler))
        .route(
            "/api/rooms/{roomName}/participants",
            get(api_rooms::list_participants_handler),
        )
        .route(
            "/api/rooms/{roomName}/participants/{identity}",
            get(api_rooms::get_participant_handler)
                .delete(api_rooms::remove_participant_handler),
        )
        .route(
            "/api/rooms/{roomName}/participants/{identity}/permissions",
            patch(api_rooms::update_permissions_handler),
        )
        .route(
            "/api/rooms/{roomName}/participants/{identity}/metadata",
            patch(api_rooms::update_metadata_handler),
        )
        .route(
            "/api/rooms/{roomName}/participants/{identity}/tracks/{trackSid}",
            patch(api_rooms::mute_track_handler),
        )
        .route("/api/agents/attach", post(api_agents::attach_agent_handler))
        .route("/api/agents/create", post(api_agents::attach_agent_handler))
        .route("/api/agents/list", get(api_agents::list_agents_handler))
        .route(
            "/api/agents/{roomName}",
            get(api_agents::get_agent_handler).delete(api_agents::remove_agent_handler),
        )
        .route(
            "/api/initialize-room",
            post(api_bootstrap::initialize_room_handler),
        )
        .route(
            "/webhooks/livekit",
            post(api_webhooks::livekit_webhook_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_check_returns_ok() {
        let app = app(AppState::from_livekit_config(LiveKitConfig::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
