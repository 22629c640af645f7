//! Error types for the watch-history client.

use thiserror::Error;

/// Errors raised inside the watch-history client.
///
/// These never cross the [`ScrobbleApi`](crate::ScrobbleApi) boundary: the
/// client logs them and reports `false`.
#[derive(Error, Debug)]
pub enum ScrobbleError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Service error ({status}): {message}")]
    Status { status: u16, message: String },

    /// No credentials available
    #[error("Authentication required")]
    AuthRequired,

    /// Token refresh failed
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    /// Invalid service URL
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Credential persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] skipper_core::SkipperError),
}

/// Result type for watch-history client operations.
pub type Result<T> = std::result::Result<T, ScrobbleError>;
