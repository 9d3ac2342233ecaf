//! Error types for bc-ws

use thiserror::Error;

/// WebSocket error type
#[derive(Error, Debug)]
pub enum WsError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("socket error: {0}")]
    Socket(#[from] axum::Error),
}

/// Result type alias for bc-ws
pub type Result<T> = std::result::Result<T, WsError>;
