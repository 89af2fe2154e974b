//! Transport traits
//!
//! An established duplex connection is split into a receive half, owned by
//! the session's background reader, and a send half, owned by the session's
//! control loop. Only the control loop ever writes.

use async_trait::async_trait;

use pw_protocol::WireFrame;

use crate::error::TransportError;

/// Close code for a normal closure
pub const CLOSE_NORMAL: u16 = 1000;

/// Receive half of a connection
#[async_trait]
pub trait FrameSource: Send + 'static {
    /// Wait for the next data frame
    ///
    /// Returns `Ok(None)` once the peer has closed the connection.
    async fn recv(&mut self) -> Result<Option<WireFrame>, TransportError>;
}

/// Send half of a connection
#[async_trait]
pub trait FrameSink: Send {
    /// Send a data frame
    async fn send(&mut self, frame: WireFrame) -> Result<(), TransportError>;

    /// Send a close control frame, starting the close handshake
    async fn send_close(&mut self, code: u16, reason: &str) -> Result<(), TransportError>;

    /// Release the connection
    async fn close(&mut self) -> Result<(), TransportError>;
}
