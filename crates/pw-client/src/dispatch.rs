//! Inbound frame handling on the client
//!
//! The client never replies. A `Pong` structured frame is a heartbeat
//! acknowledgment; anything else, including binary frames too short to carry
//! a tag, is logged as unrecognized.

use pw_core::Dispatcher;
use pw_protocol::{
    classify, BodyFormat, Heartbeat, Inbound, MessageTag, ProtocolError, WireFrame,
};

/// Logs heartbeat acknowledgments from the server
#[derive(Debug)]
pub struct HeartbeatMonitor {
    /// Serializer the server uses for bodies
    format: BodyFormat,
    /// Number of acknowledgments seen
    acknowledged: u64,
}

impl HeartbeatMonitor {
    /// Create a new monitor
    pub fn new(format: BodyFormat) -> Self {
        Self {
            format,
            acknowledged: 0,
        }
    }

    /// Number of heartbeat acknowledgments received so far
    pub fn acknowledged(&self) -> u64 {
        self.acknowledged
    }
}

impl Dispatcher for HeartbeatMonitor {
    fn dispatch(&mut self, frame: WireFrame) -> Result<Option<WireFrame>, ProtocolError> {
        let inbound = match classify(frame) {
            Ok(inbound) => inbound,
            Err(ProtocolError::MalformedFrame { len }) => {
                tracing::debug!(len, "recv unrecognized short binary frame");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match inbound {
            Inbound::Structured(structured) if structured.message_tag() == Some(MessageTag::Pong) => {
                let body: Heartbeat = structured.decode_body(self.format)?;
                self.acknowledged += 1;
                tracing::debug!(
                    tag = structured.tag,
                    body_len = structured.body.len(),
                    ?body,
                    "Heartbeat acknowledged"
                );
            }
            Inbound::Structured(structured) => {
                tracing::debug!(
                    tag = structured.tag,
                    body = ?structured.body,
                    "recv unrecognized structured frame"
                );
            }
            Inbound::Opaque(frame) => {
                tracing::debug!("recv: {:?}", frame);
            }
        }

        Ok(None)
    }
}
