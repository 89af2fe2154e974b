//! pw-core: Shared session machinery for pulsewire
//!
//! This crate provides the connection session loop used by both the client
//! and the server, the transport traits it runs over, and the configuration
//! structures for both processes.

pub mod config;
pub mod error;
pub mod session;
pub mod signal;
pub mod time;
pub mod traits;

pub use error::{ConfigError, TransportError};
pub use session::{Session, SessionExit, SessionState};
pub use traits::{Dispatcher, FrameSink, FrameSource};
