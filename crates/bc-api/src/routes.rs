//! Route definitions

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers::{block_date, booked_dates, health, unblock_date};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Read endpoint, no auth
        .route("/api/booked-dates", get(booked_dates))
        // Admin endpoints, secret in the X-API-Secret header
        .route("/api/admin/block-date", post(block_date))
        .route("/api/admin/unblock-date", delete(unblock_date))
}
