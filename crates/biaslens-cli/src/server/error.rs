//! API error types and handling.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use biaslens::{BiasLensError, ErrorKind};
use serde::Serialize;
use tokio::task::JoinError;
use tracing::error;

/// Message returned for failures whose detail stays in the server log.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Error from the biaslens library.
    BiasLens(BiasLensError),
    /// A blocking task failed to complete.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Blocking task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    UNEXPECTED_MESSAGE.to_string(),
                )
            }
            ApiError::BiasLens(e) => match e.kind() {
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found", e.to_string()),
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, "bad_request", e.to_string()),
                ErrorKind::RenderFailure => {
                    error!(error = %e, "Report rendering failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "render_failure",
                        e.to_string(),
                    )
                }
                ErrorKind::Unexpected => {
                    error!(error = ?e, "Unexpected failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal",
                        UNEXPECTED_MESSAGE.to_string(),
                    )
                }
            },
        };

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

impl From<BiasLensError> for ApiError {
    fn from(err: BiasLensError) -> Self {
        ApiError::BiasLens(err)
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::BiasLens(e) => write!(f, "BiasLens error: {}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
