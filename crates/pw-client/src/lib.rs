//! pw-client: Connection initiator for pulsewire
//!
//! The client dials the server's WebSocket endpoint, probes it with a
//! structured `Ping` on every heartbeat tick and logs whatever comes back
//! until it is interrupted.

pub mod dispatch;
pub mod transport;

pub use dispatch::HeartbeatMonitor;
pub use transport::{Connector, WsSink, WsSource};
