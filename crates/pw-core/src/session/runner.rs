//! Session control loop

use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

use pw_protocol::{ProtocolError, WireFrame};

use crate::config::SessionConfig;
use crate::error::TransportError;
use crate::traits::{Dispatcher, FrameSink, FrameSource, CLOSE_NORMAL};

use super::heartbeat::{HeartbeatEmitter, TimestampTicker};
use super::reader::read_loop;
use super::state::{SessionExit, SessionState, Termination};

/// Capacity of the queue between the background reader and the control loop.
///
/// The reader blocks once this many replies are waiting to be sent, which
/// applies backpressure to the peer instead of buffering without bound.
const REPLY_CHANNEL_CAPACITY: usize = 64;

/// One managed lifecycle of a single duplex connection
pub struct Session<R, W, D> {
    /// Receive half, moved into the background reader
    source: R,
    /// Send half, used only by the control loop
    sink: W,
    /// Inbound frame handler
    dispatcher: D,
    /// Timers and codec settings
    config: SessionConfig,
    /// External shutdown request
    shutdown: CancellationToken,
    /// Published lifecycle state
    state_tx: watch::Sender<SessionState>,
}

impl<R, W, D> Session<R, W, D>
where
    R: FrameSource,
    W: FrameSink,
    D: Dispatcher,
{
    /// Create a session over an established connection
    ///
    /// Cancelling `shutdown` starts the close handshake. Cancelling it more
    /// than once, or after the session has ended, has no further effect.
    pub fn new(
        source: R,
        sink: W,
        dispatcher: D,
        config: SessionConfig,
        shutdown: CancellationToken,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Running);

        Self {
            source,
            sink,
            dispatcher,
            config,
            shutdown,
            state_tx,
        }
    }

    /// Subscribe to lifecycle state changes
    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Run the session until it terminates
    ///
    /// The connection is closed exactly once before this returns.
    pub async fn run(self) -> SessionExit {
        let Self {
            source,
            mut sink,
            dispatcher,
            config,
            shutdown,
            state_tx,
        } = self;

        let (reply_tx, reply_rx) = mpsc::channel(REPLY_CHANNEL_CAPACITY);
        let (done_tx, done_rx) = oneshot::channel();

        let reader = tokio::spawn(read_loop(
            source,
            dispatcher,
            config.codec_error_policy,
            reply_tx,
            done_tx,
        ));

        let mut control = ControlLoop {
            sink: &mut sink,
            config: &config,
            state_tx: &state_tx,
            replies: reply_rx,
            done: done_rx,
        };
        let exit = control.run(&shutdown).await;

        if let Err(e) = sink.close().await {
            tracing::debug!("Error closing connection: {}", e);
        }
        reader.abort();
        state_tx.send_replace(SessionState::Terminated);

        if exit.is_graceful() {
            tracing::info!("Session ended: {}", exit);
        } else {
            tracing::warn!("Session ended: {}", exit);
        }
        exit
    }
}

/// State the control loop borrows while the session is live
struct ControlLoop<'a, W> {
    sink: &'a mut W,
    config: &'a SessionConfig,
    state_tx: &'a watch::Sender<SessionState>,
    replies: mpsc::Receiver<WireFrame>,
    done: oneshot::Receiver<Termination>,
}

impl<W: FrameSink> ControlLoop<'_, W> {
    /// Multiplex session events until termination
    async fn run(&mut self, shutdown: &CancellationToken) -> SessionExit {
        let mut heartbeat = match self.heartbeat() {
            Ok(heartbeat) => heartbeat,
            Err(e) => return SessionExit::CodecFailed(e),
        };
        let mut ticker = self
            .config
            .tick_interval
            .filter(|period| !period.is_zero())
            .map(TimestampTicker::new);

        loop {
            tokio::select! {
                biased;

                termination = &mut self.done => {
                    return reader_exit(termination);
                }

                _ = shutdown.cancelled() => {
                    tracing::info!("interrupt");
                    break;
                }

                Some(reply) = self.replies.recv() => {
                    if let Err(e) = self.send(reply).await {
                        return SessionExit::WriteFailed(e);
                    }
                }

                (probe, seq) = next_probe(&mut heartbeat) => {
                    tracing::debug!(seq, "Sending heartbeat");
                    if let Err(e) = self.send(probe).await {
                        return SessionExit::WriteFailed(e);
                    }
                }

                frame = next_timestamp(&mut ticker) => {
                    if let Err(e) = self.send(frame).await {
                        return SessionExit::WriteFailed(e);
                    }
                }
            }
        }

        self.close_local().await
    }

    /// Send a close frame and wait, bounded, for the peer to close
    ///
    /// Replies still queued by the reader are discarded.
    async fn close_local(&mut self) -> SessionExit {
        self.state_tx.send_replace(SessionState::ClosingLocal);

        if let Err(e) = self.sink.send_close(CLOSE_NORMAL, "").await {
            tracing::debug!("write close: {}", e);
            return SessionExit::WriteFailed(e);
        }

        let deadline = tokio::time::sleep(self.config.close_timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                biased;

                termination = &mut self.done => {
                    tracing::debug!(?termination, "Peer closed after close frame");
                    return SessionExit::ShutdownAcknowledged;
                }

                // Nothing may follow the close frame, but the reader must not
                // block on a full queue while the peer's close is pending
                Some(reply) = self.replies.recv() => {
                    tracing::trace!(
                        kind = %reply.kind(),
                        len = reply.len(),
                        "Discarding reply after close"
                    );
                }

                _ = &mut deadline => {
                    tracing::debug!(
                        "Peer did not close within {:?}",
                        self.config.close_timeout
                    );
                    return SessionExit::ShutdownTimedOut;
                }
            }
        }
    }

    async fn send(&mut self, frame: WireFrame) -> Result<(), TransportError> {
        let kind = frame.kind();
        let len = frame.len();

        self.sink.send(frame).await.map_err(|e| {
            tracing::debug!("write: {}", e);
            e
        })?;

        tracing::debug!(%kind, len, "write");
        Ok(())
    }

    fn heartbeat(&self) -> Result<Option<HeartbeatEmitter>, ProtocolError> {
        self.config
            .heartbeat_interval
            .filter(|period| !period.is_zero())
            .map(|period| HeartbeatEmitter::new(period, self.config.body_format))
            .transpose()
    }
}

/// Map the reader's termination signal to a session exit
fn reader_exit(termination: Result<Termination, oneshot::error::RecvError>) -> SessionExit {
    match termination {
        Ok(termination) => termination.into(),
        // Reader dropped its sender without reporting, e.g. it panicked
        Err(_) => SessionExit::ReadFailed(TransportError::Read(
            "background reader stopped unexpectedly".to_string(),
        )),
    }
}

async fn next_probe(heartbeat: &mut Option<HeartbeatEmitter>) -> (WireFrame, u64) {
    match heartbeat {
        Some(emitter) => emitter.tick().await,
        None => std::future::pending().await,
    }
}

async fn next_timestamp(ticker: &mut Option<TimestampTicker>) -> WireFrame {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}
