//! LiveKit integration for the Chorus control plane.
//!
//! Wraps the LiveKit server SDK behind the pieces the HTTP layer needs:
//! access-token issuance, room and participant management, the in-memory
//! voice-agent registry, and webhook verification/dispatch.
//!
//! The actual media session lives entirely on the LiveKit side. This crate
//! never touches audio; the agent registry only records that an agent is
//! expected to serve a room, it does not run one.

pub mod config;
pub mod error;
pub mod registry;
pub mod rooms;
pub mod token;
pub mod webhooks;

pub use config::LiveKitConfig;
pub use error::LiveKitError;
pub use registry::{AgentRegistration, AgentRegistry};
pub use rooms::{CreateRoomParams, PermissionUpdate, RoomControl, RoomManager};
pub use token::{TokenGrants, TokenIssuer};
pub use webhooks::{EventKind, WebhookDispatcher};
