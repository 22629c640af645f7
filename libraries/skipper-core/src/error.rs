/// Core error types for Skipper
use thiserror::Error;

/// Result type alias using `SkipperError`
pub type Result<T> = std::result::Result<T, SkipperError>;

/// Core error type for Skipper
#[derive(Error, Debug)]
pub enum SkipperError {
    /// Marker window violates `0 <= start < end`
    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    /// Settings storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SkipperError {
    /// Create an invalid marker error
    pub fn invalid_marker(msg: impl Into<String>) -> Self {
        Self::InvalidMarker(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
