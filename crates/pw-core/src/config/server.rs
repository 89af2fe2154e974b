//! Server configuration

use serde::{Deserialize, Serialize};

use pw_protocol::{BalanceReply, BodyFormat};

use super::SessionConfig;
use crate::error::ConfigError;

/// Configuration for the server (connection responder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to
    pub bind_address: String,

    /// Record sent back when a client sends the text frame `"ping"`
    pub reply: BalanceReply,

    /// Settings applied to every accepted session
    pub session: SessionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "localhost:8080".to_string(),
            reply: BalanceReply::new(168, 0),
            session: SessionConfig {
                // The server only answers; clients drive the heartbeat
                heartbeat_interval: None,
                // Text replies must stay valid UTF-8
                body_format: BodyFormat::Json,
                ..SessionConfig::default()
            },
        }
    }
}

impl ServerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.is_empty() {
            return Err(ConfigError::Invalid(
                "bind_address must not be empty".to_string(),
            ));
        }
        self.session.validate()
    }
}
