#![allow(dead_code)]

use async_trait::async_trait;
use chorus_livekit::{
    AgentRegistry, CreateRoomParams, LiveKitConfig, LiveKitError, PermissionUpdate, RoomControl,
    TokenIssuer, WebhookDispatcher,
};
use chorus_server::AppState;
use livekit_protocol::{ParticipantInfo, Room};
use serde_json::Value;
use std::sync::Arc;

pub const TEST_URL: &str = "http://localhost:7880";
pub const TEST_KEY: &str = "devkey";
pub const TEST_SECRET: &str = "secret";

pub fn test_config() -> LiveKitConfig {
    LiveKitConfig::new(TEST_URL, TEST_KEY, TEST_SECRET)
}

/// Local stand-in for the LiveKit room service. `fail: true` makes every
/// call report a platform error, for testing faithful error forwarding.
pub struct FakeRoomControl {
    pub fail: bool,
}

impl FakeRoomControl {
    fn check(&self) -> Result<(), LiveKitError> {
        if self.fail {
            return Err(LiveKitError::RoomService(
                "platform rejected the call".to_owned(),
            ));
        }
        Ok(())
    }

    fn participant(identity: &str) -> ParticipantInfo {
        ParticipantInfo {
            sid: format!("PA_{identity}"),
            identity: identity.to_owned(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RoomControl for FakeRoomControl {
    async fn create_room(
        &self,
        name: &str,
        _params: CreateRoomParams,
    ) -> Result<Room, LiveKitError> {
        self.check()?;
        Ok(Room {
            sid: format!("RM_{name}"),
            name: name.to_owned(),
            ..Default::default()
        })
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, LiveKitError> {
        self.check()?;
        Ok(vec![Room {
            sid: "RM_demo".to_owned(),
            name: "demo".to_owned(),
            ..Default::default()
        }])
    }

    async fn delete_room(&self, _room: &str) -> Result<(), LiveKitError> {
        self.check()
    }

    async fn list_participants(&self, _room: &str) -> Result<Vec<ParticipantInfo>, LiveKitError> {
        self.check()?;
        Ok(vec![Self::participant("alice")])
    }

    async fn get_participant(
        &self,
        _room: &str,
        identity: &str,
    ) -> Result<ParticipantInfo, LiveKitError> {
        self.check()?;
        Ok(Self::participant(identity))
    }

    async fn update_participant_permissions(
        &self,
        _room: &str,
        identity: &str,
        _permissions: PermissionUpdate,
    ) -> Result<ParticipantInfo, LiveKitError> {
        self.check()?;
        Ok(Self::participant(identity))
    }

    async fn update_participant_metadata(
        &self,
        _room: &str,
        identity: &str,
        metadata: &str,
    ) -> Result<ParticipantInfo, LiveKitError> {
        self.check()?;
        Ok(ParticipantInfo {
            metadata: metadata.to_owned(),
            ..Self::participant(identity)
        })
    }

    async fn remove_participant(&self, _room: &str, _identity: &str) -> Result<(), LiveKitError> {
        self.check()
    }

    async fn mute_published_track(
        &self,
        _room: &str,
        _identity: &str,
        _track_sid: &str,
        _muted: bool,
    ) -> Result<(), LiveKitError> {
        self.check()
    }
}

/// App state over the fake room service with working token signing.
pub fn test_state() -> AppState {
    test_state_with_rooms(Arc::new(FakeRoomControl { fail: false }))
}

pub fn test_state_with_rooms(rooms: Arc<dyn RoomControl>) -> AppState {
    let config = test_config();
    AppState {
        rooms,
        tokens: Arc::new(TokenIssuer::new(config.clone())),
        agents: Arc::new(AgentRegistry::new()),
        webhooks: Arc::new(WebhookDispatcher::new(&config)),
    }
}

pub async fn body_json(response: axum::http::Response<axum::body::Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: axum::http::Response<axum::body::Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
