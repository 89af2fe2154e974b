//! Background reader: the only task that receives from the transport

use tokio::sync::{mpsc, oneshot};

use crate::config::CodecErrorPolicy;
use crate::traits::{Dispatcher, FrameSource};

use super::state::Termination;

/// Receive and dispatch frames until the connection ends
///
/// Fires `done` exactly once with the reason the reader stopped. Replies
/// produced by the dispatcher are queued for the control loop.
pub(crate) async fn read_loop<R, D>(
    mut source: R,
    mut dispatcher: D,
    policy: CodecErrorPolicy,
    replies: mpsc::Sender<pw_protocol::WireFrame>,
    done: oneshot::Sender<Termination>,
) where
    R: FrameSource,
    D: Dispatcher,
{
    let termination = loop {
        let frame = match source.recv().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::debug!("Peer closed the connection");
                break Termination::PeerClosed;
            }
            Err(e) => {
                tracing::debug!("read: {}", e);
                break Termination::ReadFailed(e);
            }
        };

        tracing::debug!(kind = %frame.kind(), len = frame.len(), "recv");

        match dispatcher.dispatch(frame) {
            Ok(Some(reply)) => {
                if replies.send(reply).await.is_err() {
                    // Control loop already finished; nobody is waiting on us
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => match policy {
                CodecErrorPolicy::Drop => {
                    tracing::warn!("Dropping frame: {}", e);
                }
                CodecErrorPolicy::Terminate => {
                    tracing::error!("Codec error, terminating session: {}", e);
                    break Termination::CodecFailed(e);
                }
            },
        }
    };

    let _ = done.send(termination);
}
