//! API error taxonomy and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use sheetgate_core::EncodeError;
use sheetgate_host::HostError;

/// Request-fatal errors, mapped to HTTP status codes.
///
/// Per-operation failures in the batch-write path are not represented here;
/// those are recovered locally and reported inline in the `results` list.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No automation process is reachable (503).
    #[error("{0}")]
    HostUnavailable(String),

    /// A named workbook/sheet is absent, no active target exists, or the
    /// sheet holds no data (404).
    #[error("{0}")]
    NotFound(String),

    /// The request body is missing or malformed (400).
    #[error("{0}")]
    Validation(String),

    /// Anything else (500). Only the message is surfaced, never a backtrace.
    #[error("{0}")]
    Internal(String),
}

impl From<HostError> for ApiError {
    fn from(err: HostError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<EncodeError> for ApiError {
    fn from(err: EncodeError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::HostUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            tracing::warn!("request failed: {self}");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
