//! Session transport over an axum WebSocket

use std::borrow::Cow;

use async_trait::async_trait;
use axum::extract::ws::{CloseFrame, Message, WebSocket};
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};

use pw_core::{FrameSink, FrameSource, TransportError};
use pw_protocol::WireFrame;

/// Receive half of an accepted connection
pub struct AxumSource {
    stream: SplitStream<WebSocket>,
}

impl AxumSource {
    /// Wrap the stream half of a split socket
    pub fn new(stream: SplitStream<WebSocket>) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl FrameSource for AxumSource {
    async fn recv(&mut self) -> Result<Option<WireFrame>, TransportError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(WireFrame::Text(text))),
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(WireFrame::Binary(Bytes::from(data))))
                }
                Some(Ok(Message::Close(frame))) => {
                    if let Some(frame) = frame {
                        tracing::debug!(
                            code = frame.code,
                            reason = %frame.reason,
                            "Close frame received"
                        );
                    }
                    return Ok(None);
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                Some(Err(e)) => return Err(TransportError::Read(e.to_string())),
                None => return Ok(None),
            }
        }
    }
}

/// Send half of an accepted connection
pub struct AxumSink {
    sink: SplitSink<WebSocket, Message>,
}

impl AxumSink {
    /// Wrap the sink half of a split socket
    pub fn new(sink: SplitSink<WebSocket, Message>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl FrameSink for AxumSink {
    async fn send(&mut self, frame: WireFrame) -> Result<(), TransportError> {
        let message = match frame {
            WireFrame::Text(text) => Message::Text(text),
            WireFrame::Binary(data) => Message::Binary(data.to_vec()),
        };

        self.sink
            .send(message)
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    async fn send_close(&mut self, code: u16, reason: &str) -> Result<(), TransportError> {
        let frame = CloseFrame {
            code,
            reason: Cow::Owned(reason.to_owned()),
        };

        self.sink
            .send(Message::Close(Some(frame)))
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.sink
            .close()
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }
}
