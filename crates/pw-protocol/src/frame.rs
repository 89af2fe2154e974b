//! Frame header encoding/decoding
//!
//! A structured frame is carried in a single binary WebSocket message:
//! - message_tag: 2 bytes (u16, big-endian)
//! - body: remaining bytes, serialized with the configured [`BodyFormat`]
//!
//! [`BodyFormat`]: crate::codec::BodyFormat

use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;

/// Size of the frame header in bytes
pub const HEADER_SIZE: usize = 2;

/// Kind of a transport-level frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// UTF-8 text frame
    Text,
    /// Binary frame
    Binary,
    /// Close control frame
    Close,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Text => write!(f, "text"),
            FrameKind::Binary => write!(f, "binary"),
            FrameKind::Close => write!(f, "close"),
        }
    }
}

/// One discrete data frame sent or received on the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFrame {
    /// Text frame
    Text(String),
    /// Binary frame
    Binary(Bytes),
}

impl WireFrame {
    /// Kind of this frame
    pub fn kind(&self) -> FrameKind {
        match self {
            WireFrame::Text(_) => FrameKind::Text,
            WireFrame::Binary(_) => FrameKind::Binary,
        }
    }

    /// Raw payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            WireFrame::Text(text) => text.as_bytes(),
            WireFrame::Binary(data) => data,
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write a message tag into a byte buffer
pub fn encode_header(tag: u16, dst: &mut BytesMut) {
    dst.reserve(HEADER_SIZE);
    dst.put_u16(tag);
}

/// Read the message tag from the first two bytes of a frame
///
/// Fails with [`ProtocolError::MalformedFrame`] if fewer than
/// [`HEADER_SIZE`] bytes are available.
pub fn decode_header(src: &[u8]) -> Result<u16, ProtocolError> {
    if src.len() < HEADER_SIZE {
        return Err(ProtocolError::MalformedFrame { len: src.len() });
    }

    let mut header = &src[..HEADER_SIZE];
    Ok(header.get_u16())
}
