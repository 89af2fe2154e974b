//! Core trait definitions

mod dispatch;
mod transport;

pub use dispatch::Dispatcher;
pub use transport::{FrameSink, FrameSource, CLOSE_NORMAL};
