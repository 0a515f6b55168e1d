//! Error types for reqstate operations.
//!
//! The tracker itself never returns these: every request outcome is folded
//! into an [`ApiResult`](crate::ApiResult). They cover setup and plumbing
//! around it (client construction, route discovery, serving).

use thiserror::Error;

/// Errors that can occur outside of a tracked call.
#[derive(Debug, Error)]
pub enum ReqStateError {
    /// Configuration is missing or incomplete.
    #[error("reqstate configuration required: {0}")]
    ConfigMissing(String),

    /// The request was aborted through its [`AbortSignal`](crate::AbortSignal).
    #[error("Request to {url} was aborted")]
    Aborted { url: String },

    /// No tracker is registered under this name.
    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// The `/api` route directory could not be fetched or was malformed.
    #[error("Route directory unavailable: {message}")]
    RouteDirectoryUnavailable {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Socket or other I/O error (binding the mock server).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for reqstate operations.
pub type Result<T> = core::result::Result<T, ReqStateError>;
