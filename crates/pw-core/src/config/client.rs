//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::serde_utils::duration_secs;
use super::SessionConfig;
use crate::error::ConfigError;

/// Configuration for the client (connection initiator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server address to connect to (host:port)
    pub server_address: String,

    /// Path of the WebSocket endpoint on the server
    pub path: String,

    /// Bound on the WebSocket handshake
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,

    /// Session settings
    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_address: "localhost:8080".to_string(),
            path: "/echo".to_string(),
            connect_timeout: Duration::from_secs(10),
            session: SessionConfig::default(),
        }
    }
}

impl ClientConfig {
    /// WebSocket URL of the server endpoint
    pub fn url(&self) -> String {
        format!("ws://{}{}", self.server_address, self.path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_address.is_empty() {
            return Err(ConfigError::Invalid(
                "server_address must not be empty".to_string(),
            ));
        }
        if !self.path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "path must start with '/': {}",
                self.path
            )));
        }
        self.session.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let config = ClientConfig::default();
        assert_eq!(config.url(), "ws://localhost:8080/echo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_path_rejected() {
        let config = ClientConfig {
            path: "echo".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
