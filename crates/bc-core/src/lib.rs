//! bc-core: Booking Calendar Core Library
//!
//! Provides the blocked-date registry, date validation, SQLite persistence
//! and the registry-change notification channel shared by the HTTP API,
//! the WebSocket gateway and the Telegram bot.

pub mod config;
pub mod date;
pub mod error;
pub mod notify;
pub mod registry;

pub use config::Config;
pub use date::NormalizedDate;
pub use error::{Error, Result};
pub use notify::{NotificationChannel, Snapshot};
pub use registry::{BlockedDateStore, DateRegistry};
