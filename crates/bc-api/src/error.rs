//! Error types for bc-api

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// bc-api error type
///
/// Every variant renders to the caller as `{"success": false, "message"}`.
/// Storage detail is logged server-side only and never echoed.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid API secret")]
    Unauthorized,

    #[error("{0}")]
    InvalidDate(String),

    #[error("this date is already blocked")]
    AlreadyBlocked,

    #[error("this date is not blocked")]
    NotBlocked,

    #[error("storage error")]
    Storage(String),
}

impl From<bc_core::Error> for ApiError {
    fn from(err: bc_core::Error) -> Self {
        match err {
            bc_core::Error::AlreadyBlocked => Self::AlreadyBlocked,
            bc_core::Error::NotBlocked => Self::NotBlocked,
            bc_core::Error::InvalidDate(msg) => Self::InvalidDate(format!("invalid date: {msg}")),
            other => Self::Storage(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "invalid API secret".to_string(),
            ),
            Self::InvalidDate(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::AlreadyBlocked => (
                StatusCode::BAD_REQUEST,
                "this date is already blocked".to_string(),
            ),
            Self::NotBlocked => (
                StatusCode::BAD_REQUEST,
                "this date is not blocked".to_string(),
            ),
            Self::Storage(detail) => {
                error!("storage failure: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_conflicts_map_to_business_errors() {
        assert!(matches!(
            ApiError::from(bc_core::Error::AlreadyBlocked),
            ApiError::AlreadyBlocked
        ));
        assert!(matches!(
            ApiError::from(bc_core::Error::NotBlocked),
            ApiError::NotBlocked
        ));
    }

    #[test]
    fn non_business_errors_map_to_storage() {
        let err = bc_core::Error::Config("db down".to_string());
        assert!(matches!(ApiError::from(err), ApiError::Storage(_)));
    }
}
