//! WebSocket transport to the server

mod connector;

pub use connector::{Connector, WsSink, WsSource};
