//! Admin-secret authentication
//!
//! The shared secret is accepted only from the `X-API-Secret` request
//! header, never from the body or the query string, so it cannot leak into
//! access logs or browser history.

use axum::http::HeaderMap;
use tracing::warn;

use crate::error::ApiError;

/// Header carrying the shared admin secret.
pub const SECRET_HEADER: &str = "x-api-secret";

/// Compare a supplied secret against the configured one without
/// short-circuiting on attacker-controlled bytes. Every byte of the
/// expected secret is always inspected.
pub fn secret_matches(supplied: &str, expected: &str) -> bool {
    let supplied = supplied.as_bytes();
    let expected = expected.as_bytes();

    let mut diff = supplied.len() ^ expected.len();
    for (i, &e) in expected.iter().enumerate() {
        let s = supplied.get(i).copied().unwrap_or(0);
        diff |= usize::from(s ^ e);
    }
    diff == 0
}

/// Authorize a mutation request or fail with [`ApiError::Unauthorized`].
pub fn require_secret(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    let supplied = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    match supplied {
        Some(s) if secret_matches(s, expected) => Ok(()),
        Some(_) => {
            warn!("rejected admin request with invalid API secret");
            Err(ApiError::Unauthorized)
        }
        None => {
            warn!("rejected admin request with missing API secret");
            Err(ApiError::Unauthorized)
        }
    }
}
