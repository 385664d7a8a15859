//! Error types for bproc-daemon

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bproc_toolchain::{Envelope, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request rejected before the pipeline ran. Always HTTP 400.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not JSON, or lacked a required field
    #[error("{0}")]
    BadRequest(String),

    /// Body parsed but failed validation
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!("rejecting request: {}", self);
        (StatusCode::BAD_REQUEST, Json(Envelope::error(self.to_string()))).into_response()
    }
}

/// Failures while picking an example program
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read examples directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no examples available in {}", .0.display())]
    Empty(PathBuf),

    #[error("failed to read example {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;
