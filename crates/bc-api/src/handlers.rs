//! HTTP API handlers
//!
//! Read and admin endpoints over the blocked-date registry.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use bc_core::NormalizedDate;

use crate::auth::require_secret;
use crate::error::ApiError;
use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Body of a block/unblock request
#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub date: String,
}

/// Query-string fallback for DELETE requests sent without a body
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Response for the read endpoint
#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub success: bool,
    pub dates: Vec<String>,
    pub total: usize,
}

/// Response for a successful mutation
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    pub dates: Vec<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK" })
}

/// GET /api/booked-dates - current blocked dates, no auth required
pub async fn booked_dates(State(state): State<AppState>) -> Json<DatesResponse> {
    let dates = state.registry.snapshot().await;
    Json(DatesResponse {
        success: true,
        total: dates.len(),
        dates,
    })
}

/// POST /api/admin/block-date
pub async fn block_date(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<DateRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    require_secret(&headers, &state.api_secret)?;
    let date = parse_request_date(&req.date)?;

    let dates = state.registry.block(date).await?;
    info!("date blocked: {date}");
    state.notifier.publish(dates.clone());

    Ok(Json(MutationResponse {
        success: true,
        message: format!("date {date} blocked"),
        dates,
    }))
}

/// DELETE /api/admin/unblock-date
///
/// The date is taken from the JSON body when one is present, otherwise from
/// the `?date=` query parameter. The secret is header-only either way.
pub async fn unblock_date(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
    body: Bytes,
) -> Result<Json<MutationResponse>, ApiError> {
    require_secret(&headers, &state.api_secret)?;

    let from_body = if body.is_empty() {
        None
    } else {
        let parsed: DateRequest = serde_json::from_slice(&body)
            .map_err(|_| ApiError::InvalidDate("malformed JSON body".to_string()))?;
        Some(parsed.date)
    };
    let raw = from_body
        .or(query.date)
        .ok_or_else(|| ApiError::InvalidDate("missing date".to_string()))?;
    let date = parse_request_date(&raw)?;

    let dates = state.registry.unblock(date).await?;
    info!("date unblocked: {date}");
    state.notifier.publish(dates.clone());

    Ok(Json(MutationResponse {
        success: true,
        message: format!("date {date} unblocked"),
        dates,
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// Strip every character outside `[0-9-]`.
fn sanitize_date(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Validate the raw input exactly as received, then re-parse a sanitized
/// copy so only `[0-9-]` bytes ever flow past this point.
fn parse_request_date(raw: &str) -> Result<NormalizedDate, ApiError> {
    NormalizedDate::parse(raw).map_err(ApiError::from)?;
    NormalizedDate::parse(&sanitize_date(raw)).map_err(ApiError::from)
}
