// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of errors to HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use seekwell_core::SeekwellError;

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

/// Errors returned by gateway handlers and middleware.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or unknown bearer token.
    Unauthorized,
    /// Request body could not be decoded.
    BadRequest(String),
    Seekwell(SeekwellError),
}

impl From<SeekwellError> for ApiError {
    fn from(err: SeekwellError) -> Self {
        ApiError::Seekwell(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// HTTP status for a domain error.
pub fn status_for(err: &SeekwellError) -> StatusCode {
    match err {
        SeekwellError::Validation(_) | SeekwellError::InvalidBackend { .. } => {
            StatusCode::BAD_REQUEST
        }
        SeekwellError::Permission { .. } => StatusCode::FORBIDDEN,
        SeekwellError::NotFound { .. } => StatusCode::NOT_FOUND,
        SeekwellError::Conflict(_) => StatusCode::CONFLICT,
        SeekwellError::BackendUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        SeekwellError::Config(_)
        | SeekwellError::Storage { .. }
        | SeekwellError::Backend { .. }
        | SeekwellError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "unauthorized".to_string(),
                    message: "missing or invalid bearer token".to_string(),
                },
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "validation".to_string(),
                    message,
                },
            ),
            ApiError::Seekwell(err) => {
                let status = status_for(&err);
                let message = if status.is_server_error() {
                    tracing::error!(error = %err, "request failed");
                    "internal error".to_string()
                } else {
                    err.to_string()
                };
                (
                    status,
                    ErrorResponse {
                        error: err.kind().to_string(),
                        message,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
