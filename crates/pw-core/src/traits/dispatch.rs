//! Inbound frame dispatch

use pw_protocol::{ProtocolError, WireFrame};

/// Turns each inbound frame into at most one outbound frame
///
/// Runs on the session's background reader. Replies are handed to the
/// control loop, which sends them in order.
pub trait Dispatcher: Send + 'static {
    /// Handle one inbound frame, optionally producing a reply
    fn dispatch(&mut self, frame: WireFrame) -> Result<Option<WireFrame>, ProtocolError>;
}

impl<F> Dispatcher for F
where
    F: FnMut(WireFrame) -> Result<Option<WireFrame>, ProtocolError> + Send + 'static,
{
    fn dispatch(&mut self, frame: WireFrame) -> Result<Option<WireFrame>, ProtocolError> {
        self(frame)
    }
}
