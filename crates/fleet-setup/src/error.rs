//! Error types for the setup services.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Vendor calls return [`ClientError`] values; each route decides how to
//! surface them, and whatever reaches axum goes through [`AppError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Body returned for every error that is not a deliberate HTTP status.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Errors from the vendor API client.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("HTTP {status}: {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
        /// Response body
        body: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A successful response without a field the flow needs
    #[error("Response is missing `{0}`")]
    MissingField(&'static str),
}

impl ClientError {
    /// Create a status error.
    #[must_use]
    pub fn status_error(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body: body.into(),
        }
    }

    /// HTTP status returned by the vendor, if the call got that far.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the call timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Errors returned from route handlers.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Deliberate HTTP error, passed to the client unchanged
    #[error("HTTP {status}: {message}")]
    Http {
        /// Response status
        status: StatusCode,
        /// Response body
        message: String,
    },

    /// Vendor call failed and the route does not recover from it
    #[error("Upstream error: {0}")]
    Upstream(#[from] ClientError),
}

impl AppError {
    /// Create a pass-through HTTP error.
    #[must_use]
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http { status, message: message.into() }
    }

    /// Create a 400 error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::http(StatusCode::BAD_REQUEST, message)
    }

    /// Status the client will see.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Http { status, .. } => *status,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Http { message, .. } => {
                tracing::error!(status = status.as_u16(), %message, "Request failed");
                (status, message).into_response()
            }
            Self::Upstream(err) => {
                match &err {
                    ClientError::Status { status, reason, body } => {
                        tracing::error!(status, %reason, %body, "Vendor call failed");
                    }
                    other if other.is_timeout() => {
                        tracing::error!(error = %other, "Vendor call timed out");
                    }
                    other => tracing::error!(error = %other, "Vendor call failed"),
                }
                (status, UNKNOWN_ERROR).into_response()
            }
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for route handlers.
pub type AppResult<T> = Result<T, AppError>;
