//! Error types for bc-telegram

use thiserror::Error;

/// bc-telegram error type
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("backend request failed: {0}")]
    Backend(#[from] reqwest::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BotError>;
