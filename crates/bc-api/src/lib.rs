//! bc-api: HTTP API for the booking calendar
//!
//! Exposes the read and admin endpoints over the blocked-date registry.
//! Built with axum for async HTTP handling.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::routes;
pub use server::{AppState, start_server};
