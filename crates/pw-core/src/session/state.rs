//! Session lifecycle state and exit outcomes

use std::fmt;

use pw_protocol::ProtocolError;

use crate::error::TransportError;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Dispatching frames and emitting heartbeats
    Running,
    /// Close frame sent, waiting for the peer to close
    ClosingLocal,
    /// Connection released
    Terminated,
}

/// How a session ended
#[derive(Debug)]
pub enum SessionExit {
    /// The peer closed the connection
    PeerClosed,
    /// Receiving from the transport failed
    ReadFailed(TransportError),
    /// A frame could not be encoded or decoded and the policy is to terminate
    CodecFailed(ProtocolError),
    /// Sending a frame or the close frame failed
    WriteFailed(TransportError),
    /// Local shutdown; the peer closed within the close timeout
    ShutdownAcknowledged,
    /// Local shutdown; the peer never closed and the close timeout elapsed
    ShutdownTimedOut,
}

impl SessionExit {
    /// Whether the session ended without an error
    pub fn is_graceful(&self) -> bool {
        matches!(
            self,
            SessionExit::PeerClosed
                | SessionExit::ShutdownAcknowledged
                | SessionExit::ShutdownTimedOut
        )
    }
}

impl fmt::Display for SessionExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionExit::PeerClosed => write!(f, "peer closed the connection"),
            SessionExit::ReadFailed(e) => write!(f, "{}", e),
            SessionExit::CodecFailed(e) => write!(f, "{}", e),
            SessionExit::WriteFailed(e) => write!(f, "{}", e),
            SessionExit::ShutdownAcknowledged => write!(f, "close acknowledged by peer"),
            SessionExit::ShutdownTimedOut => write!(f, "close timed out waiting for peer"),
        }
    }
}

/// Why the background reader stopped
#[derive(Debug)]
pub(crate) enum Termination {
    PeerClosed,
    ReadFailed(TransportError),
    CodecFailed(ProtocolError),
}

impl From<Termination> for SessionExit {
    fn from(termination: Termination) -> Self {
        match termination {
            Termination::PeerClosed => SessionExit::PeerClosed,
            Termination::ReadFailed(e) => SessionExit::ReadFailed(e),
            Termination::CodecFailed(e) => SessionExit::CodecFailed(e),
        }
    }
}
