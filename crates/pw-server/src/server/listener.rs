//! HTTP listener
//!
//! Serves the demonstration page and upgrades `/echo` requests, then drains
//! live sessions once shutdown is requested.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use pw_core::config::ServerConfig;

use crate::server::{handler, home};
use crate::state::ServerState;

/// WebSocket echo server
pub struct EchoServer {
    /// Shared server state
    state: Arc<ServerState>,
}

impl EchoServer {
    /// Create a new server
    pub fn new(config: ServerConfig, shutdown: CancellationToken) -> Self {
        Self {
            state: Arc::new(ServerState::new(config, shutdown)),
        }
    }

    /// Get the shared server state
    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(home::home))
            .route("/echo", get(handler::echo))
            .with_state(self.state.clone())
    }

    /// Bind to the configured address and serve until shutdown
    pub async fn bind_and_run(&self) -> Result<()> {
        let bind_addr = &self.state.config.bind_address;
        let listener = TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("Failed to bind to {}", bind_addr))?;

        self.run(listener).await
    }

    /// Serve on an already bound listener until shutdown
    ///
    /// Returns once the listener has stopped and every session has ended.
    pub async fn run(&self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", local_addr);

        let app = self.router();
        let shutdown = self.state.shutdown.clone();

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("HTTP server failed")?;

        tracing::info!(
            sessions = self.state.sessions.len(),
            "Listener stopped, waiting for sessions to close"
        );
        self.state.sessions.close();
        self.state.sessions.wait().await;

        tracing::info!("Server shut down");
        Ok(())
    }
}
