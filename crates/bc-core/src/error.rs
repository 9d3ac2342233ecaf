//! Error types for bc-core

use thiserror::Error;

/// Main error type for bc-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("this date is already blocked")]
    AlreadyBlocked,

    #[error("this date is not blocked")]
    NotBlocked,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bc-core
pub type Result<T> = std::result::Result<T, Error>;
