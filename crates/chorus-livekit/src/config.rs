use serde::{Deserialize, Serialize};
use std::fmt;

fn default_token_ttl_seconds() -> u64 {
    600
}

fn default_empty_timeout_seconds() -> u32 {
    600
}

fn default_max_participants() -> u32 {
    20
}

/// Connection and policy settings for the LiveKit deployment this control
/// plane fronts. Loaded once at startup; the API secret is never serialized
/// or logged.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing)]
    pub api_secret: String,
    /// JWT TTL in seconds for issued join tokens. Default: 600 (10 minutes).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
    /// Seconds an empty room survives before LiveKit reclaims it.
    #[serde(default = "default_empty_timeout_seconds")]
    pub empty_timeout_seconds: u32,
    /// Participant cap applied to rooms created without an explicit limit.
    #[serde(default = "default_max_participants")]
    pub max_participants: u32,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
            empty_timeout_seconds: default_empty_timeout_seconds(),
            max_participants: default_max_participants(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("empty_timeout_seconds", &self.empty_timeout_seconds)
            .field("max_participants", &self.max_participants)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Self::default()
        }
    }

    /// Both halves of the signing credential are present. Routes that sign
    /// or verify anything refuse to proceed without this.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let config = LiveKitConfig::new("ws://localhost:7880", "devkey", "secret");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("devkey"));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: LiveKitConfig = toml::from_str(
            r#"
            url = "ws://localhost:7880"
            api_key = "key"
            api_secret = "secret"
            "#,
        )
        .expect("parse TOML");

        assert_eq!(config.token_ttl_seconds, 600);
        assert_eq!(config.empty_timeout_seconds, 600);
        assert_eq!(config.max_participants, 20);
        assert!(config.has_credentials());
    }

    #[test]
    fn empty_credentials_are_detected() {
        assert!(!LiveKitConfig::default().has_credentials());
        assert!(!LiveKitConfig::new("ws://x", "key", "").has_credentials());
        assert!(!LiveKitConfig::new("ws://x", "", "secret").has_credentials());
    }
}
