//! bc-ws: WebSocket push gateway for the booking calendar
//!
//! Streams registry snapshots to connected viewers: the current list on
//! connect, then every update as it happens.

pub mod error;
pub mod handler;
pub mod message;
pub mod server;

pub use error::{Result, WsError};
pub use handler::websocket_handler;
pub use message::ServerMessage;
pub use server::{WsState, router};
