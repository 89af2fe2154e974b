//! Per-connection session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use pw_protocol::BodyFormat;

use super::serde_utils::{duration_secs, option_duration_secs};
use crate::error::ConfigError;

/// What a session does when a frame cannot be encoded or decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecErrorPolicy {
    /// Log the error, drop the frame and keep the session alive
    #[default]
    Drop,
    /// End the session
    Terminate,
}

/// Configuration for a single connection session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Period between heartbeat probes (0 = no heartbeat)
    #[serde(with = "option_duration_secs")]
    pub heartbeat_interval: Option<Duration>,

    /// How long to wait for the peer to close after we send a close frame
    #[serde(with = "duration_secs")]
    pub close_timeout: Duration,

    /// Period of the timestamp text frame (0 = disabled)
    #[serde(with = "option_duration_secs")]
    pub tick_interval: Option<Duration>,

    /// Handling of undecodable inbound frames and unencodable replies
    pub codec_error_policy: CodecErrorPolicy,

    /// Serializer for structured frame bodies
    pub body_format: BodyFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Some(Duration::from_secs(2)),
            close_timeout: Duration::from_secs(10),
            tick_interval: None,
            codec_error_policy: CodecErrorPolicy::Drop,
            body_format: BodyFormat::Bincode,
        }
    }
}

impl SessionConfig {
    /// Check that all configured periods are usable
    ///
    /// Zero-length timer periods are rejected; disabled timers are `None`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heartbeat_interval.is_some_and(|p| p.is_zero()) {
            return Err(ConfigError::Invalid(
                "heartbeat_interval must be at least 1 second".to_string(),
            ));
        }
        if self.tick_interval.is_some_and(|p| p.is_zero()) {
            return Err(ConfigError::Invalid(
                "tick_interval must be at least 1 second".to_string(),
            ));
        }
        if self.close_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "close_timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.heartbeat_interval, Some(Duration::from_secs(2)));
        assert_eq!(config.close_timeout, Duration::from_secs(10));
        assert_eq!(config.tick_interval, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_periods_rejected() {
        let config = SessionConfig {
            heartbeat_interval: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = SessionConfig {
            close_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_disabled_heartbeat_survives_toml() {
        let config = SessionConfig {
            heartbeat_interval: None,
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("heartbeat_interval = 0"));

        let parsed: SessionConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_tick_enabled_from_toml() {
        let parsed: SessionConfig = toml::from_str("tick_interval = 30").unwrap();
        assert_eq!(parsed.tick_interval, Some(Duration::from_secs(30)));
        assert_eq!(parsed.heartbeat_interval, Some(Duration::from_secs(2)));
    }
}
