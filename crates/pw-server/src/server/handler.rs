//! WebSocket upgrade handler
//!
//! Every accepted connection runs its own session with the echo dispatcher.
//! Sessions are tracked so shutdown can wait for their close handshakes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::Response;
use futures::StreamExt;
use tracing::Instrument;

use pw_core::Session;

use crate::dispatch::EchoDispatcher;
use crate::server::socket::{AxumSink, AxumSource};
use crate::state::ServerState;

/// Upgrade the request and hand the socket to a new session
pub async fn echo(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<Arc<ServerState>>,
) -> Response {
    let sessions = state.sessions.clone();
    let span = tracing::info_span!("session", %peer);

    ws.on_failed_upgrade(move |e| tracing::warn!(%peer, "upgrade: {}", e))
        .on_upgrade(move |socket| {
            sessions.track_future(handle_socket(socket, state).instrument(span))
        })
}

/// Run one session to completion
async fn handle_socket(socket: WebSocket, state: Arc<ServerState>) {
    tracing::info!("Connection accepted");

    let (sink, stream) = socket.split();
    let dispatcher = EchoDispatcher::new(state.config.reply, state.config.session.body_format);

    let exit = Session::new(
        AxumSource::new(stream),
        AxumSink::new(sink),
        dispatcher,
        state.config.session.clone(),
        state.shutdown.child_token(),
    )
    .run()
    .await;

    tracing::debug!("Connection handler finished: {}", exit);
}
