//! Structured frame encoding and inbound classification

use std::fmt;

use bytes::{Bytes, BytesMut};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::frame::{decode_header, encode_header, WireFrame, HEADER_SIZE};
use crate::message::MessageTag;

/// Serializer used for structured frame bodies
///
/// Both ends of a connection must agree on the format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// Compact binary encoding
    #[default]
    Bincode,
    /// JSON encoding; keeps structured frames valid UTF-8
    Json,
}

impl BodyFormat {
    /// Serialize a record into body bytes
    pub fn serialize<T: Serialize>(&self, body: &T) -> Result<Vec<u8>, ProtocolError> {
        let result = match self {
            BodyFormat::Bincode => bincode::serialize(body).map_err(|e| e.to_string()),
            BodyFormat::Json => serde_json::to_vec(body).map_err(|e| e.to_string()),
        };

        result.map_err(|message| ProtocolError::Encode {
            format: *self,
            message,
        })
    }

    /// Deserialize body bytes into a record
    ///
    /// An empty body is a valid, default-valued record.
    pub fn deserialize<T: DeserializeOwned + Default>(
        &self,
        bytes: &[u8],
    ) -> Result<T, ProtocolError> {
        if bytes.is_empty() {
            return Ok(T::default());
        }

        let result = match self {
            BodyFormat::Bincode => bincode::deserialize(bytes).map_err(|e| e.to_string()),
            BodyFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        };

        result.map_err(|message| ProtocolError::Decode {
            format: *self,
            message,
        })
    }
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyFormat::Bincode => write!(f, "bincode"),
            BodyFormat::Json => write!(f, "json"),
        }
    }
}

/// A decoded structured frame: tag plus still-serialized body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredFrame {
    /// Raw message tag
    pub tag: u16,
    /// Serialized body (may be empty)
    pub body: Bytes,
}

impl StructuredFrame {
    /// The well-known tag, if this frame carries one
    pub fn message_tag(&self) -> Option<MessageTag> {
        MessageTag::from_u16(self.tag)
    }

    /// Deserialize the body
    pub fn decode_body<T: DeserializeOwned + Default>(
        &self,
        format: BodyFormat,
    ) -> Result<T, ProtocolError> {
        decode_body(&self.body, format)
    }
}

/// Result of classifying an inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Binary frame with a tag header
    Structured(StructuredFrame),
    /// Anything else, passed through untouched
    Opaque(WireFrame),
}

/// Encode a tag and record into the structured wire layout
pub fn encode_structured<T: Serialize>(
    tag: MessageTag,
    body: &T,
    format: BodyFormat,
) -> Result<Bytes, ProtocolError> {
    let payload = format.serialize(body)?;

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    encode_header(tag.as_u16(), &mut buf);
    buf.extend_from_slice(&payload);

    Ok(buf.freeze())
}

/// Split a structured frame into its tag and body
pub fn decode_structured(src: Bytes) -> Result<StructuredFrame, ProtocolError> {
    let tag = decode_header(&src)?;
    Ok(StructuredFrame {
        tag,
        body: src.slice(HEADER_SIZE..),
    })
}

/// Deserialize the body part of a structured frame (bytes after the header)
pub fn decode_body<T: DeserializeOwned + Default>(
    body: &[u8],
    format: BodyFormat,
) -> Result<T, ProtocolError> {
    format.deserialize(body)
}

/// Classify an inbound frame as structured or opaque
///
/// Binary frames are expected to carry a tag header; text frames are opaque.
pub fn classify(frame: WireFrame) -> Result<Inbound, ProtocolError> {
    match frame {
        WireFrame::Binary(data) => {
            let structured = decode_structured(data)?;
            tracing::trace!(
                tag = structured.tag,
                body_len = structured.body.len(),
                "Classified structured frame"
            );
            Ok(Inbound::Structured(structured))
        }
        text @ WireFrame::Text(_) => Ok(Inbound::Opaque(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{BalanceReply, Heartbeat};

    #[test]
    fn test_structured_roundtrip() {
        let reply = BalanceReply::new(168, 7);

        for format in [BodyFormat::Bincode, BodyFormat::Json] {
            let encoded = encode_structured(MessageTag::Pong, &reply, format).unwrap();
            assert_eq!(&encoded[..HEADER_SIZE], &[0x00, 0x02]);

            let decoded: BalanceReply = decode_body(&encoded[HEADER_SIZE..], format).unwrap();
            assert_eq!(decoded, reply);
        }
    }

    #[test]
    fn test_heartbeat_probe_has_empty_bincode_body() {
        let encoded =
            encode_structured(MessageTag::Ping, &Heartbeat::default(), BodyFormat::Bincode)
                .unwrap();
        assert_eq!(&encoded[..], &[0x00, 0x01]);
    }

    #[test]
    fn test_empty_body_is_default_record() {
        for format in [BodyFormat::Bincode, BodyFormat::Json] {
            let reply: BalanceReply = decode_body(&[], format).unwrap();
            assert_eq!(reply, BalanceReply::default());
        }
    }

    #[test]
    fn test_undecodable_body() {
        let result: Result<BalanceReply, _> = decode_body(&[0x01, 0x02, 0x03], BodyFormat::Bincode);
        assert!(matches!(
            result,
            Err(ProtocolError::Decode {
                format: BodyFormat::Bincode,
                ..
            })
        ));

        let result: Result<BalanceReply, _> = decode_body(b"not json", BodyFormat::Json);
        assert!(matches!(result, Err(ProtocolError::Decode { .. })));
    }

    #[test]
    fn test_classify_binary_as_structured() {
        let frame = WireFrame::Binary(Bytes::from_static(&[0x00, 0x02, 0xFF]));

        match classify(frame).unwrap() {
            Inbound::Structured(structured) => {
                assert_eq!(structured.message_tag(), Some(MessageTag::Pong));
                assert_eq!(&structured.body[..], &[0xFF]);
            }
            other => panic!("Expected structured frame, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_text_as_opaque() {
        let frame = WireFrame::Text("hello".into());
        assert_eq!(classify(frame.clone()).unwrap(), Inbound::Opaque(frame));
    }

    #[test]
    fn test_classify_short_binary_is_malformed() {
        let frame = WireFrame::Binary(Bytes::from_static(&[0x07]));
        let err = classify(frame).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedFrame { len: 1 }));
        assert!(err.is_decode());
    }

    #[test]
    fn test_unknown_tag_is_still_structured() {
        let frame = WireFrame::Binary(Bytes::from_static(&[0x12, 0x34]));
        match classify(frame).unwrap() {
            Inbound::Structured(structured) => {
                assert_eq!(structured.tag, 0x1234);
                assert_eq!(structured.message_tag(), None);
                assert!(structured.body.is_empty());
            }
            other => panic!("Expected structured frame, got {:?}", other),
        }
    }

    #[test]
    fn test_json_structured_frame_is_utf8() {
        let encoded =
            encode_structured(MessageTag::Pong, &BalanceReply::new(168, 0), BodyFormat::Json)
                .unwrap();
        assert!(std::str::from_utf8(&encoded).is_ok());
    }
}
