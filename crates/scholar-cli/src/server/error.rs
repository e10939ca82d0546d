//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scholar::ScholarError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
    /// Error from the scholar library.
    Scholar(ScholarError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::Scholar(e) => match e {
                ScholarError::UnknownKind(_) => (StatusCode::BAD_REQUEST, "unknown_kind"),
                ScholarError::KindMismatch { .. } => (StatusCode::BAD_REQUEST, "kind_mismatch"),
                ScholarError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
                ScholarError::PageOutOfRange { .. } => {
                    (StatusCode::BAD_REQUEST, "page_out_of_range")
                }
                ScholarError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                ScholarError::UpstreamUnavailable(_) => {
                    (StatusCode::BAD_GATEWAY, "upstream_unavailable")
                }
                ScholarError::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "cancelled"),
                ScholarError::Config(_) | ScholarError::Persistence(_) | ScholarError::Json(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
            ApiError::Scholar(e) => e.to_string(),
        };
        if status.is_server_error() {
            tracing::warn!(status = %status, error, message = %message, "Request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<ScholarError> for ApiError {
    fn from(err: ScholarError) -> Self {
        ApiError::Scholar(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Scholar(e) => write!(f, "Scholar error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
