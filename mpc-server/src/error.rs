//! HTTP error type for mpc-server
//!
//! Every error renders as `{"message": ...}`; validation failures add an
//! `errors` array of `{field, message}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mpc_common::FieldError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Malformed request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Field-level validation failures (400)
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Missing or invalid session (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Duplicate slug (409)
    #[error("{0}")]
    Conflict(String),

    /// Upstream integration not configured (503)
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Common(#[from] mpc_common::Error),
}

impl ApiError {
    fn status_and_body(self) -> (StatusCode, serde_json::Value) {
        use mpc_common::Error as Common;

        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Validation(errors) => {
                return (
                    StatusCode::BAD_REQUEST,
                    json!({"message": "Validation failed", "errors": errors}),
                );
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Common(Common::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::Common(Common::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Common(Common::Validation(errors)) => {
                return (
                    StatusCode::BAD_REQUEST,
                    json!({"message": "Validation failed", "errors": errors}),
                );
            }
            ApiError::Common(Common::Conflict(msg)) => (
                StatusCode::CONFLICT,
                format!("A record with this slug already exists ({})", msg),
            ),
            ApiError::Common(other) => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), message = %message, "Request failed");
        }
        (status, json!({ "message": message }))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
