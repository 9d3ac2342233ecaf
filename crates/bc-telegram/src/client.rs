//! HTTP client for the booking-calendar API
//!
//! The bot is a plain API consumer: it talks to the same endpoints any
//! other client would, authenticating mutations with the shared secret in
//! the `X-API-Secret` header.

use serde::Deserialize;
use tracing::debug;

use bc_core::NormalizedDate;

use crate::Result;

/// Header carrying the shared admin secret.
const SECRET_HEADER: &str = "X-API-Secret";

/// Client for the booking-calendar HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    secret: String,
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    dates: Vec<String>,
    #[serde(default)]
    message: Option<String>,
}

/// How the backend answered a mutation: accepted, or rejected by a
/// business rule (bad secret, duplicate, unknown date). Transport failures
/// surface as errors instead, so callers can word the two differently.
#[derive(Debug)]
pub enum ApiOutcome {
    Accepted { dates: Vec<String> },
    Rejected { message: String },
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, secret: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            secret: secret.into(),
        }
    }

    /// GET /api/booked-dates
    pub async fn booked_dates(&self) -> Result<Vec<String>> {
        let envelope: Envelope = self
            .http
            .get(format!("{}/api/booked-dates", self.base_url))
            .send()
            .await?
            .json()
            .await?;
        debug!("fetched {} blocked dates", envelope.dates.len());
        Ok(envelope.dates)
    }

    /// POST /api/admin/block-date
    pub async fn block_date(&self, date: &NormalizedDate) -> Result<ApiOutcome> {
        let response = self
            .http
            .post(format!("{}/api/admin/block-date", self.base_url))
            .header(SECRET_HEADER, &self.secret)
            .json(&serde_json::json!({ "date": date.to_string() }))
            .send()
            .await?;
        Self::outcome(response).await
    }

    /// DELETE /api/admin/unblock-date
    pub async fn unblock_date(&self, date: &NormalizedDate) -> Result<ApiOutcome> {
        let response = self
            .http
            .delete(format!("{}/api/admin/unblock-date", self.base_url))
            .header(SECRET_HEADER, &self.secret)
            .json(&serde_json::json!({ "date": date.to_string() }))
            .send()
            .await?;
        Self::outcome(response).await
    }

    async fn outcome(response: reqwest::Response) -> Result<ApiOutcome> {
        let envelope: Envelope = response.json().await?;
        if envelope.success {
            Ok(ApiOutcome::Accepted {
                dates: envelope.dates,
            })
        } else {
            Ok(ApiOutcome::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "request rejected".to_string()),
            })
        }
    }
}
