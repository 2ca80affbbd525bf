// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Non-success status or an error payload from GitHub.
    #[error("GitHub query failed: {0}")]
    RemoteQuery(String),

    /// GitHub answered, but the body is missing fields we need.
    #[error("GitHub returned unusable data: {0}")]
    RemoteData(String),

    /// GitHub failure while serving a stored wrapped.
    #[error("Reading wrapped failed: {0}")]
    RemoteRead(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Error message used when GitHub rejects the credential.
    pub const BAD_CREDENTIALS: &'static str = "bad credentials";

    /// Error message used when GitHub rate limits the request.
    pub const RATE_LIMITED: &'static str = "rate limit exceeded";

    /// Whether this error came from talking to GitHub.
    pub fn is_remote(&self) -> bool {
        matches!(self, AppError::RemoteQuery(_) | AppError::RemoteData(_))
    }

    /// Re-tag a GitHub failure hit on the read path.
    pub fn on_read_path(self) -> Self {
        if self.is_remote() {
            AppError::RemoteRead(self.to_string())
        } else {
            self
        }
    }

    /// Whether GitHub rejected the credential itself.
    pub fn is_bad_credentials(&self) -> bool {
        matches!(self, AppError::RemoteQuery(msg) if msg == Self::BAD_CREDENTIALS)
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "private", Some(msg.clone())),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::RemoteQuery(_) | AppError::RemoteData(_) => {
                tracing::warn!(error = %self, "Generation failed on GitHub data");
                (
                    StatusCode::BAD_GATEWAY,
                    "generate_failed",
                    Some(self.to_string()),
                )
            }
            AppError::RemoteRead(_) => {
                tracing::warn!(error = %self, "Wrapped read failed on GitHub");
                (
                    StatusCode::BAD_GATEWAY,
                    "wrapped_get_failed",
                    Some(self.to_string()),
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
