//! Protocol error types

use thiserror::Error;

use crate::codec::BodyFormat;
use crate::frame::HEADER_SIZE;

/// Errors that can occur while encoding or decoding structured frames
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Frame is too short to carry a message tag
    #[error("Malformed frame: {len} bytes is shorter than the {HEADER_SIZE}-byte header")]
    MalformedFrame { len: usize },

    /// Body bytes could not be deserialized
    #[error("Failed to decode {format} body: {message}")]
    Decode { format: BodyFormat, message: String },

    /// Body could not be serialized
    #[error("Failed to encode {format} body: {message}")]
    Encode { format: BodyFormat, message: String },
}

impl ProtocolError {
    /// Whether this error came from reading inbound bytes
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ProtocolError::MalformedFrame { .. } | ProtocolError::Decode { .. }
        )
    }
}
