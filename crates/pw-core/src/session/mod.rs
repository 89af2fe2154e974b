//! Connection session lifecycle
//!
//! A [`Session`] owns one established connection. It runs two units of
//! execution: a background reader that receives and dispatches inbound
//! frames, and a control loop that multiplexes the reader's termination
//! signal, queued replies, heartbeat and periodic timers, and the external
//! shutdown request. The connection is closed exactly once when the session
//! ends, whichever way it ends.

mod heartbeat;
mod reader;
mod runner;
mod state;

pub use heartbeat::{HeartbeatEmitter, TimestampTicker};
pub use runner::Session;
pub use state::{SessionExit, SessionState};
