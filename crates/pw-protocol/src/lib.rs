//! pw-protocol: Wire protocol for pulsewire
//!
//! This crate defines the structured frame layout exchanged between the
//! client and the server over a WebSocket connection: a 2-byte big-endian
//! message tag followed by a serialized body.

pub mod codec;
pub mod error;
pub mod frame;
pub mod message;

pub use codec::{
    classify, decode_body, decode_structured, encode_structured, BodyFormat, Inbound,
    StructuredFrame,
};
pub use error::ProtocolError;
pub use frame::{decode_header, encode_header, FrameKind, WireFrame, HEADER_SIZE};
pub use message::{BalanceReply, Heartbeat, MessageTag};
