use crate::config::LiveKitConfig;
use crate::error::LiveKitError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Capability profile baked into an issued token.
///
/// Management-issued tokens grant only room join; the playground path hands
/// out full publish/subscribe/data capability for interactive testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenGrants {
    pub can_publish: bool,
    pub can_subscribe: bool,
    pub can_publish_data: bool,
}

impl TokenGrants {
    pub fn join_only() -> Self {
        Self {
            can_publish: false,
            can_subscribe: false,
            can_publish_data: false,
        }
    }

    pub fn full() -> Self {
        Self {
            can_publish: true,
            can_subscribe: true,
            can_publish_data: true,
        }
    }
}

/// Issues signed LiveKit access tokens for a (participant, room) pair.
///
/// Signing is a local deterministic operation; there is no retry and no
/// network I/O here.
#[derive(Debug)]
pub struct TokenIssuer {
    config: LiveKitConfig,
}

impl TokenIssuer {
    pub fn new(config: LiveKitConfig) -> Self {
        Self { config }
    }

    /// Builds and signs a join token for `identity` in `room`.
    ///
    /// `ttl` falls back to the configured `token_ttl_seconds`. Fails with
    /// [`LiveKitError::MissingCredentials`] before touching the signer when
    /// the key/secret pair is absent; signing failures propagate unchanged.
    pub fn issue(
        &self,
        identity: &str,
        room: &str,
        grants: TokenGrants,
        ttl: Option<Duration>,
    ) -> Result<String, LiveKitError> {
        if !self.config.has_credentials() {
            return Err(LiveKitError::MissingCredentials);
        }

        let ttl = ttl.unwrap_or(Duration::from_secs(self.config.token_ttl_seconds));
        debug!(identity, room, ttl_secs = ttl.as_secs(), "issuing access token");

        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(identity)
            .with_name(identity)
            .with_grants(VideoGrants {
                room_join: true,
                room: room.to_owned(),
                can_publish: grants.can_publish,
                can_subscribe: grants.can_subscribe,
                can_publish_data: grants.can_publish_data,
                ..Default::default()
            })
            .with_ttl(ttl)
            .to_jwt()?;

        info!(identity, room, token_len = token.len(), "issued access token");
        Ok(token)
    }
}

/// Placeholder room name for callers that did not request a specific room.
pub fn generate_room_name() -> String {
    format!("room-{}", short_id())
}

/// Placeholder participant identity for anonymous/dev token requests.
pub fn generate_identity() -> String {
    format!("identity-{}", short_id())
}

/// Placeholder end-user identity for the room bootstrap flow.
pub fn generate_user_identity() -> String {
    format!("user-{}", short_id())
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_owned()
}
