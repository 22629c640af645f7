//! Error types for community marker providers.

use thiserror::Error;

/// Errors a single provider can produce.
///
/// These never reach callers of the aggregator: a failing provider simply
/// contributes no markers.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded the provider timeout
    #[error("Provider timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Provider returned a non-success response
    #[error("Provider error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to parse provider response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid provider base URL
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
