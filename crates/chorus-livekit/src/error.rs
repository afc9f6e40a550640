use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiveKitError {
    /// The API key/secret pair is absent. Checked before any signing or
    /// verification attempt; the message carries no credential material.
    #[error("LiveKit API key/secret are not configured")]
    MissingCredentials,

    #[error("token error: {0}")]
    Token(#[from] livekit_api::access_token::AccessTokenError),

    #[error("room service error: {0}")]
    RoomService(String),

    #[error("webhook verification failed: {0}")]
    Webhook(String),
}
