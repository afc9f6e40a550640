use crate::config::LiveKitConfig;
use crate::error::LiveKitError;
use livekit_api::access_token::TokenVerifier;
use livekit_api::webhooks::WebhookReceiver;
use livekit_protocol::WebhookEvent;
use tracing::{info, warn};

/// The event kinds LiveKit pushes to this service, as a closed set.
///
/// Kinds this service has no handler for land in `Unhandled` and are routed
/// to a single logging sink; adding a new handled kind means adding a
/// variant and a match arm, not editing a string table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    RoomStarted,
    RoomFinished,
    ParticipantJoined,
    ParticipantLeft,
    TrackPublished,
    TrackUnpublished,
    Unhandled(String),
}

impl From<&str> for EventKind {
    fn from(name: &str) -> Self {
        match name {
            "room_started" => Self::RoomStarted,
            "room_finished" => Self::RoomFinished,
            "participant_joined" => Self::ParticipantJoined,
            "participant_left" => Self::ParticipantLeft,
            "track_published" => Self::TrackPublished,
            "track_unpublished" => Self::TrackUnpublished,
            other => Self::Unhandled(other.to_owned()),
        }
    }
}

/// Verifies inbound LiveKit webhook payloads and routes them to handlers.
///
/// Stateless per request: events are parsed, dispatched, and discarded.
/// Delivery retries, if any, are the platform's responsibility.
pub struct WebhookDispatcher {
    receiver: WebhookReceiver,
    credentials_present: bool,
}

impl WebhookDispatcher {
    pub fn new(config: &LiveKitConfig) -> Self {
        let verifier = TokenVerifier::with_api_key(&config.api_key, &config.api_secret);
        Self {
            receiver: WebhookReceiver::new(verifier),
            credentials_present: config.has_credentials(),
        }
    }

    /// Verifies `body` against the `Authorization` credential and decodes
    /// the event.
    ///
    /// All verification failures collapse into [`LiveKitError::Webhook`];
    /// callers surface them as a single "invalid webhook payload" response
    /// without detailing which check failed.
    pub fn receive(&self, body: &str, auth_token: &str) -> Result<WebhookEvent, LiveKitError> {
        if !self.credentials_present {
            return Err(LiveKitError::MissingCredentials);
        }

        self.receiver.receive(body, auth_token).map_err(|e| {
            warn!(error = %e, "webhook verification failed");
            LiveKitError::Webhook(e.to_string())
        })
    }

    /// Routes a verified event to its handler. Never fails: once a payload
    /// verifies, the platform gets a success response regardless of what
    /// the handler does.
    pub fn dispatch(&self, event: &WebhookEvent) {
        match EventKind::from(event.event.as_str()) {
            EventKind::RoomStarted => on_room_started(event),
            EventKind::RoomFinished => on_room_finished(event),
            EventKind::ParticipantJoined => on_participant_joined(event),
            EventKind::ParticipantLeft => on_participant_left(event),
            EventKind::TrackPublished => on_track_published(event),
            EventKind::TrackUnpublished => on_track_unpublished(event),
            EventKind::Unhandled(kind) => {
                info!(kind = %kind, "ignoring webhook event with no handler");
            }
        }
    }
}

// Handlers are side-effect points for future lifecycle bookkeeping; today
// they only record that the transition happened. Agent registrations are
// intentionally left untouched by room_finished.

fn on_room_started(event: &WebhookEvent) {
    info!(room = room_name(event), "room started");
}

fn on_room_finished(event: &WebhookEvent) {
    info!(room = room_name(event), "room finished");
}

fn on_participant_joined(event: &WebhookEvent) {
    info!(
        room = room_name(event),
        participant = participant_identity(event),
        "participant joined"
    );
}

fn on_participant_left(event: &WebhookEvent) {
    info!(
        room = room_name(event),
        participant = participant_identity(event),
        "participant left"
    );
}

fn on_track_published(event: &WebhookEvent) {
    info!(
        room = room_name(event),
        participant = participant_identity(event),
        track = track_sid(event),
        "track published"
    );
}

fn on_track_unpublished(event: &WebhookEvent) {
    info!(
        room = room_name(event),
        participant = participant_identity(event),
        track = track_sid(event),
        "track unpublished"
    );
}

fn room_name(event: &WebhookEvent) -> &str {
    event
        .room
        .as_ref()
        .map(|r| r.name.as_str())
        .unwrap_or("<unknown>")
}

fn participant_identity(event: &WebhookEvent) -> &str {
    event
        .participant
        .as_ref()
        .map(|p| p.identity.as_str())
        .unwrap_or("<unknown>")
}

fn track_sid(event: &WebhookEvent) -> &str {
    event
        .track
        .as_ref()
        .map(|t| t.sid.as_str())
        .unwrap_or("<unknown>")
}
