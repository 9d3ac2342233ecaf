//! bc-telegram: Telegram admin bot for the booking calendar
//!
//! Lets an operator view, block and unblock calendar dates through a reply
//! keyboard. All mutations go through the HTTP API; the bot holds no
//! calendar state of its own.

pub mod bot;
pub mod client;
pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod session;

pub use bot::CalendarBot;
pub use client::{ApiClient, ApiOutcome};
pub use error::{BotError, Result};
pub use handlers::BotState;
pub use rate_limit::RateLimiter;
pub use session::{PendingAction, SessionStore};
