//! Message tags and structured records for the pulsewire protocol
//!
//! # Message Flow
//!
//! 1. Client connects to `/echo`
//! 2. Client sends a `Ping` structured frame with a [`Heartbeat`] body on
//!    every heartbeat tick
//! 3. Server answers the text frame `"ping"` with a `Pong` structured frame
//!    carrying a [`BalanceReply`]; everything else is echoed back verbatim
//! 4. Either side ends the connection with a WebSocket close frame
//!
//! Tag values are a contract shared by both ends.

use serde::{Deserialize, Serialize};

/// Message tag identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MessageTag {
    /// Heartbeat probe
    Ping = 0x0001,
    /// Heartbeat acknowledgment
    Pong = 0x0002,
}

impl MessageTag {
    /// Convert to u16
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Convert from u16
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0001 => Some(Self::Ping),
            0x0002 => Some(Self::Pong),
            _ => None,
        }
    }
}

/// Body of a heartbeat probe or acknowledgment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {}

/// Fixed-value record the server sends in reply to `"ping"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReply {
    /// Account balance
    pub balance: i64,
    /// Result code
    pub code: i32,
}

impl BalanceReply {
    /// Create a new balance reply
    pub fn new(balance: i64, code: i32) -> Self {
        Self { balance, code }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_tag_roundtrip() {
        for tag in [MessageTag::Ping, MessageTag::Pong] {
            assert_eq!(MessageTag::from_u16(tag.as_u16()), Some(tag));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(MessageTag::from_u16(0), None);
        assert_eq!(MessageTag::from_u16(0xFFFF), None);
    }

    #[test]
    fn test_empty_records_are_zeroed() {
        let reply = BalanceReply::default();
        assert_eq!(reply, BalanceReply::new(0, 0));
    }
}
