use crate::config::LiveKitConfig;
use crate::error::LiveKitError;
use async_trait::async_trait;
use livekit_api::services::room::{CreateRoomOptions, RoomClient, UpdateParticipantOptions};
use livekit_protocol::{ParticipantInfo, ParticipantPermission, Room};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Optional knobs for room creation. Unset fields are filled from
/// [`LiveKitConfig`] before the call leaves the façade.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateRoomParams {
    pub empty_timeout: Option<u32>,
    pub max_participants: Option<u32>,
}

/// Partial permission set for a participant update.
///
/// Fields the caller omits are forwarded as `false`; the façade does not
/// read-modify-write the participant's current grants.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionUpdate {
    pub can_publish: Option<bool>,
    pub can_subscribe: Option<bool>,
    pub can_publish_data: Option<bool>,
}

/// Room and participant operations forwarded to the LiveKit management API.
///
/// A capability seam rather than a service object: the HTTP layer holds a
/// `dyn RoomControl`, so tests can stand in a local fake while production
/// wires up [`RoomManager`].
#[async_trait]
pub trait RoomControl: Send + Sync {
    async fn create_room(&self, name: &str, params: CreateRoomParams)
        -> Result<Room, LiveKitError>;
    async fn list_rooms(&self) -> Result<Vec<Room>, LiveKitError>;
    async fn delete_room(&self, room: &str) -> Result<(), LiveKitError>;
    async fn list_participants(&self, room: &str) -> Result<Vec<ParticipantInfo>, LiveKitError>;
    async fn get_participant(
        &self,
        room: &str,
        identity: &str,
    ) -> Result<ParticipantInfo, LiveKitError>;
    async fn update_participant_permissions(
        &self,
        room: &str,
        identity: &str,
        permissions: PermissionUpdate,
    ) -> Result<ParticipantInfo, LiveKitError>;
    async fn update_participant_metadata(
        &self,
        room: &str,
        identity: &str,
        metadata: &str,
    ) -> Result<ParticipantInfo, LiveKitError>;
    async fn remove_participant(&self, room: &str, identity: &str) -> Result<(), LiveKitError>;
    async fn mute_published_track(
        &self,
        room: &str,
        identity: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<(), LiveKitError>;
}

/// Production [`RoomControl`] over the LiveKit Room Service.
///
/// Stateless pass-through: no caching, no retries, no idempotency layer.
/// Whatever the platform answers — success or conflict — is what the caller
/// sees.
pub struct RoomManager {
    config: LiveKitConfig,
    client: RoomClient,
}

impl RoomManager {
    pub fn new(config: LiveKitConfig) -> Self {
        let client = RoomClient::with_api_key(&config.url, &config.api_key, &config.api_secret);
        info!(url = %config.url, "room service client initialized");
        Self { config, client }
    }
}

#[async_trait]
impl RoomControl for RoomManager {
    async fn create_room(
        &self,
        name: &str,
        params: CreateRoomParams,
    ) -> Result<Room, LiveKitError> {
        let options = CreateRoomOptions {
            empty_timeout: params
                .empty_timeout
                .unwrap_or(self.config.empty_timeout_seconds),
            max_participants: params
                .max_participants
                .unwrap_or(self.config.max_participants),
            ..Default::default()
        };

        let room = self.client.create_room(name, options).await.map_err(|e| {
            error!(room = name, error = %e, "create_room failed");
            LiveKitError::RoomService(e.to_string())
        })?;
        info!(room = %room.name, sid = %room.sid, "room created");
        Ok(room)
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, LiveKitError> {
        let rooms = self.client.list_rooms(Vec::new()).await.map_err(|e| {
            error!(error = %e, "list_rooms failed");
            LiveKitError::RoomService(e.to_string())
        })?;
        info!(count = rooms.len(), "listed rooms");
        Ok(rooms)
    }

    async fn delete_room(&self, room: &str) -> Result<(), LiveKitError> {
        self.client.delete_room(room).await.map_err(|e| {
            error!(room, error = %e, "delete_room failed");
            LiveKitError::RoomService(e.to_string())
        })?;
        info!(room, "room deleted");
        Ok(())
    }

    async fn list_participants(&self, room: &str) -> Result<Vec<ParticipantInfo>, LiveKitError> {
        let participants = self.client.list_participants(room).await.map_err(|e| {
            error!(room, error = %e, "list_participants failed");
            LiveKitError::RoomService(e.to_string())
        })?;
        info!(room, count = participants.len(), "listed participants");
        Ok(participants)
    }

    async fn get_participant(
        &self,
        room: &str,
        identity: &str,
    ) -> Result<ParticipantInfo, LiveKitError> {
        self.client.get_participant(room, identity).await.map_err(|e| {
            error!(room, identity, error = %e, "get_participant failed");
            LiveKitError::RoomService(e.to_string())
        })
    }

    async fn update_participant_permissions(
        &self,
        room: &str,
        identity: &str,
        permissions: PermissionUpdate,
    ) -> Result<ParticipantInfo, LiveKitError> {
        let options = UpdateParticipantOptions {
            permission: Some(ParticipantPermission {
                can_publish: permissions.can_publish.unwrap_or(false),
                can_subscribe: permissions.can_subscribe.unwrap_or(false),
                can_publish_data: permissions.can_publish_data.unwrap_or(false),
                ..Default::default()
            }),
            ..Default::default()
        };

        let updated = self
            .client
            .update_participant(room, identity, options)
            .await
            .map_err(|e| {
                error!(room, identity, error = %e, "update_participant_permissions failed");
                LiveKitError::RoomService(e.to_string())
            })?;
        info!(room, identity, "participant permissions updated");
        Ok(updated)
    }

    async fn update_participant_metadata(
        &self,
        room: &str,
        identity: &str,
        metadata: &str,
    ) -> Result<ParticipantInfo, LiveKitError> {
        let options = UpdateParticipantOptions {
            metadata: metadata.to_owned(),
            ..Default::default()
        };

        let updated = self
            .client
            .update_participant(room, identity, options)
            .await
            .map_err(|e| {
                error!(room, identity, error = %e, "update_participant_metadata failed");
                LiveKitError::RoomService(e.to_string())
            })?;
        info!(room, identity, "participant metadata updated");
        Ok(updated)
    }

    async fn remove_participant(&self, room: &str, identity: &str) -> Result<(), LiveKitError> {
        self.client
            .remove_participant(room, identity)
            .await
            .map_err(|e| {
                error!(room, identity, error = %e, "remove_participant failed");
                LiveKitError::RoomService(e.to_string())
            })?;
        info!(room, identity, "participant removed");
        Ok(())
    }

    async fn mute_published_track(
        &self,
        room: &str,
        identity: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<(), LiveKitError> {
        self.client
            .mute_published_track(room, identity, track_sid, muted)
            .await
            .map(|_| ())
            .map_err(|e| {
                error!(room, identity, track_sid, muted, error = %e, "mute_published_track failed");
                LiveKitError::RoomService(e.to_string())
            })?;
        info!(room, identity, track_sid, muted, "track mute state updated");
        Ok(())
    }
}
