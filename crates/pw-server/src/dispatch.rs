//! Responder dispatch: answer `"ping"`, echo everything else

use pw_core::Dispatcher;
use pw_protocol::{
    encode_structured, BalanceReply, BodyFormat, FrameKind, MessageTag, ProtocolError, WireFrame,
};

/// Payload that triggers the structured reply
pub const PING_PAYLOAD: &[u8] = b"ping";

/// Turns each inbound frame into exactly one outbound frame
#[derive(Debug, Clone)]
pub struct EchoDispatcher {
    /// Record sent in reply to `"ping"`
    reply: BalanceReply,
    /// Serializer for the reply body
    format: BodyFormat,
}

impl EchoDispatcher {
    /// Create a new dispatcher
    pub fn new(reply: BalanceReply, format: BodyFormat) -> Self {
        Self { reply, format }
    }

    /// Build the structured reply on the requested frame kind
    ///
    /// A text frame must stay valid UTF-8; when the encoded reply is not,
    /// it goes out as a binary frame instead.
    fn ping_reply(&self, kind: FrameKind) -> Result<WireFrame, ProtocolError> {
        let encoded = encode_structured(MessageTag::Pong, &self.reply, self.format)?;

        if kind != FrameKind::Text {
            return Ok(WireFrame::Binary(encoded));
        }

        match String::from_utf8(encoded.to_vec()) {
            Ok(text) => Ok(WireFrame::Text(text)),
            Err(_) => {
                tracing::debug!(
                    format = %self.format,
                    "Reply is not valid UTF-8, sending as binary"
                );
                Ok(WireFrame::Binary(encoded))
            }
        }
    }
}

impl Dispatcher for EchoDispatcher {
    fn dispatch(&mut self, frame: WireFrame) -> Result<Option<WireFrame>, ProtocolError> {
        if frame.as_bytes() == PING_PAYLOAD {
            tracing::debug!("heartbeat");
            return self.ping_reply(frame.kind()).map(Some);
        }

        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use pw_core::config::ServerConfig;
    use pw_protocol::{classify, decode_body, Inbound, HEADER_SIZE};

    fn dispatcher(format: BodyFormat) -> EchoDispatcher {
        EchoDispatcher::new(BalanceReply::new(168, 0), format)
    }

    fn assert_balance_reply(bytes: &[u8], format: BodyFormat) {
        assert_eq!(&bytes[..HEADER_SIZE], &MessageTag::Pong.as_u16().to_be_bytes());
        let reply: BalanceReply = decode_body(&bytes[HEADER_SIZE..], format).unwrap();
        assert_eq!(reply, BalanceReply::new(168, 0));
    }

    #[test]
    fn test_text_ping_gets_text_reply() {
        let reply = dispatcher(BodyFormat::Json)
            .dispatch(WireFrame::Text("ping".to_string()))
            .unwrap()
            .unwrap();

        assert_eq!(reply.kind(), FrameKind::Text);
        assert_balance_reply(reply.as_bytes(), BodyFormat::Json);
    }

    #[test]
    fn test_default_server_config_replies_on_text() {
        let config = ServerConfig::default();
        let reply = EchoDispatcher::new(config.reply, config.session.body_format)
            .dispatch(WireFrame::Text("ping".to_string()))
            .unwrap()
            .unwrap();

        assert_eq!(reply.kind(), FrameKind::Text);
        assert_balance_reply(reply.as_bytes(), config.session.body_format);
    }

    #[test]
    fn test_text_ping_falls_back_to_binary() {
        let reply = dispatcher(BodyFormat::Bincode)
            .dispatch(WireFrame::Text("ping".to_string()))
            .unwrap()
            .unwrap();

        assert_eq!(reply.kind(), FrameKind::Binary);
        assert_balance_reply(reply.as_bytes(), BodyFormat::Bincode);
    }

    #[test]
    fn test_binary_ping_gets_binary_reply() {
        let reply = dispatcher(BodyFormat::Bincode)
            .dispatch(WireFrame::Binary(Bytes::from_static(b"ping")))
            .unwrap()
            .unwrap();

        match classify(reply).unwrap() {
            Inbound::Structured(structured) => {
                assert_eq!(structured.message_tag(), Some(MessageTag::Pong));
                let body: BalanceReply = structured.decode_body(BodyFormat::Bincode).unwrap();
                assert_eq!(body.balance, 168);
            }
            other => panic!("Expected structured reply, got {:?}", other),
        }
    }

    #[test]
    fn test_text_is_echoed() {
        let frame = WireFrame::Text("hello".to_string());
        let reply = dispatcher(BodyFormat::Bincode)
            .dispatch(frame.clone())
            .unwrap();

        assert_eq!(reply, Some(frame));
    }

    #[test]
    fn test_binary_is_echoed() {
        let frame = WireFrame::Binary(Bytes::from_static(&[0x00, 0x01]));
        let reply = dispatcher(BodyFormat::Bincode)
            .dispatch(frame.clone())
            .unwrap();

        assert_eq!(reply, Some(frame));
    }

    #[test]
    fn test_ping_match_is_exact() {
        for text in ["Ping", "ping ", "pingping"] {
            let frame = WireFrame::Text(text.to_string());
            let reply = dispatcher(BodyFormat::Json).dispatch(frame.clone()).unwrap();
            assert_eq!(reply, Some(frame));
        }
    }
}
