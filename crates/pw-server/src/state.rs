//! Server state management

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use pw_core::config::ServerConfig;

/// Shared state for the server and its sessions
pub struct ServerState {
    /// Configuration
    pub config: ServerConfig,
    /// Root shutdown token; every session gets a child of it
    pub shutdown: CancellationToken,
    /// Live sessions, awaited on shutdown
    pub sessions: TaskTracker,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: ServerConfig, shutdown: CancellationToken) -> Self {
        Self {
            config,
            shutdown,
            sessions: TaskTracker::new(),
        }
    }
}
