//! Outbound WebSocket connector
//!
//! Dials the server and splits the socket into the receive and send halves
//! a session runs over.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use pw_core::config::ClientConfig;
use pw_core::{FrameSink, FrameSource, TransportError};
use pw_protocol::WireFrame;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Establishes the WebSocket connection to the server
pub struct Connector {
    /// Client configuration
    config: ClientConfig,
}

impl Connector {
    /// Create a new connector
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform the WebSocket handshake
    ///
    /// A single attempt bounded by the connect timeout; there is no retry.
    pub async fn connect(&self) -> Result<(WsSource, WsSink), TransportError> {
        let url = self.config.url();
        tracing::debug!("connecting to {}", url);

        let handshake = tokio_tungstenite::connect_async(url.as_str());
        let (ws, response) = tokio::time::timeout(self.config.connect_timeout, handshake)
            .await
            .map_err(|_| TransportError::Connect(format!("Timed out connecting to {}", url)))?
            .map_err(|e| TransportError::Connect(format!("Failed to connect to {}: {}", url, e)))?;

        tracing::debug!(status = %response.status(), "WebSocket handshake complete");

        let (sink, stream) = ws.split();
        Ok((WsSource { stream }, WsSink { sink }))
    }
}

/// Receive half of the client connection
pub struct WsSource {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl FrameSource for WsSource {
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
                            code = u16::from(frame.code),
                            reason = %frame.reason,
                            "Close frame received"
                        );
                    }
                    return Ok(None);
                }
                // Control frames are answered by tungstenite itself
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
                Some(Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed)) => {
                    return Ok(None)
                }
                Some(Err(e)) => return Err(TransportError::Read(e.to_string())),
                None => return Ok(None),
            }
        }
    }
}

/// Send half of the client connection
pub struct WsSink {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl FrameSink for WsSink {
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
            code: CloseCode::from(code),
            reason: reason.to_owned().into(),
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
