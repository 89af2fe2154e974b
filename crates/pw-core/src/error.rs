//! Core error types for pulsewire

use std::path::PathBuf;
use thiserror::Error;

/// Transport-level errors
///
/// Every variant ends the session it occurs in; none are retried.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Handshake or dial failure
    #[error("Connect failed: {0}")]
    Connect(String),

    /// Receive failure
    #[error("Read failed: {0}")]
    Read(String),

    /// Send failure (frame or close frame)
    #[error("Write failed: {0}")]
    Write(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
