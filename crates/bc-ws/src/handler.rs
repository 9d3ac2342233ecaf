//! WebSocket connection handler
//!
//! Each connection is an observer of the blocked-date registry: it gets the
//! current snapshot immediately on connect, then every broadcast until it
//! disconnects. Delivery is best-effort; an observer that lags behind the
//! broadcast buffer simply resumes at the newest snapshot.

use axum::extract::State;
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use bc_core::Snapshot;

use crate::Result;
use crate::message::ServerMessage;
use crate::server::WsState;

/// Handle WebSocket upgrade request
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<WsState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle established WebSocket connection
async fn handle_socket(socket: WebSocket, state: WsState) {
    let observer_id = Uuid::new_v4();
    info!("observer connected: {observer_id}");

    // Subscribe before reading the snapshot so a mutation between the two
    // steps is delivered rather than lost.
    let mut updates = state.notifier.subscribe();
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Current state goes to this observer only, not a broadcast.
    let snapshot = state.registry.snapshot().await;
    if send_update(&mut ws_tx, snapshot).await.is_err() {
        info!("observer disconnected during initial snapshot: {observer_id}");
        return;
    }

    let forward_task = async {
        loop {
            match updates.recv().await {
                Ok(snapshot) => {
                    if send_update(&mut ws_tx, snapshot).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    // Snapshots are idempotent full states; the next receive
                    // is the newest one, which supersedes everything missed.
                    warn!("observer {observer_id} lagged, skipped {missed} snapshots");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    // The viewer sends nothing we interpret; we only watch for close.
    let drain_task = async {
        while let Some(msg) = ws_rx.next().await {
            match msg {
                Ok(WsMessage::Close(_)) => {
                    debug!("observer {observer_id} sent close");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("observer {observer_id} socket error: {e}");
                    break;
                }
            }
        }
    };

    tokio::select! {
        _ = forward_task => {},
        _ = drain_task => {},
    }

    info!("observer disconnected: {observer_id}");
}

async fn send_update(
    tx: &mut SplitSink<WebSocket, WsMessage>,
    dates: Snapshot,
) -> Result<()> {
    let json = serde_json::to_string(&ServerMessage::UpdateDates { dates })?;
    tx.send(WsMessage::Text(json.into())).await?;
    Ok(())
}
