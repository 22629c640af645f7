//! Error types for playback session driving

use thiserror::Error;

/// Playback session errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The driver task is no longer running
    #[error("Session driver stopped: {0}")]
    DriverStopped(String),

    /// Command channel closed
    #[error("Session command channel closed")]
    ChannelClosed,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
