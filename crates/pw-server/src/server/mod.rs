//! HTTP server components

pub mod handler;
pub mod home;
pub mod listener;
pub mod socket;

pub use listener::EchoServer;
pub use socket::{AxumSink, AxumSource};
