//! WebSocket gateway state and routing

use std::sync::Arc;

use axum::{Router, routing::get};

use bc_core::{DateRegistry, NotificationChannel};

use crate::handler::websocket_handler;

/// Shared WebSocket gateway state
#[derive(Clone)]
pub struct WsState {
    /// Registry read on connect for the initial snapshot
    pub registry: Arc<DateRegistry>,
    /// Broadcast source for subsequent updates
    pub notifier: NotificationChannel,
}

/// Build the gateway router. Merged into the HTTP server's router so the
/// push channel shares the API listener.
pub fn router(state: WsState) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .with_state(state)
}
