//! pw-server: Connection responder for pulsewire
//!
//! The server upgrades requests on `/echo` to WebSocket sessions. Each
//! session answers the text `"ping"` with a structured `Pong` frame and
//! echoes every other frame back unchanged. A small demonstration page is
//! served on `/`.

pub mod dispatch;
pub mod server;
pub mod state;

pub use dispatch::EchoDispatcher;
pub use server::EchoServer;
pub use state::ServerState;
