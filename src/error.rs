//! Error types for the identity gateway
//!
//! Each variant of [`Error`] corresponds to one failure class of the
//! gateway's behavioral contract, and the [`IntoResponse`] impl maps it to
//! the exact status code and `{"error": ...}` body callers observe.

use std::io;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Result type alias for the identity gateway
pub type Result<T> = std::result::Result<T, Error>;

/// Identity gateway errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller omitted the Authorization header
    #[error("Token not provided")]
    TokenMissing,

    /// Upstream introspection rejected the caller's token
    #[error("Invalid or expired token")]
    TokenRejected,

    /// Service-account token could not be obtained. Collapses every root
    /// cause (bad credentials, provider downtime, transport failure) into
    /// one authorization failure.
    #[error("Unable to retrieve admin token")]
    AdminToken,

    /// Admin API call failed; the upstream status is propagated with a
    /// fixed per-operation message (the upstream error body is discarded)
    #[error("{message}")]
    Upstream {
        /// Status code to propagate to the caller
        status: u16,
        /// Fixed message for the failed operation
        message: &'static str,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create an upstream operation failure
    #[must_use]
    pub fn upstream(status: u16, message: &'static str) -> Self {
        Self::Upstream { status, message }
    }

    /// Status code this error maps to on the wire
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::TokenMissing | Self::TokenRejected | Self::AdminToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
