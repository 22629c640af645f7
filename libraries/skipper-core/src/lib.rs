//! Skipper Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling for Skipper.
//!
//! This crate provides the building blocks shared by the marker aggregator,
//! the playback session, and the scrobble sequencer.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `SkipMarker`, `EpisodeKey`, `SkipSettings`, etc.
//! - **Collaborator Traits**: `PlaybackPrimitive`, `SettingsStore`, `Clock`
//! - **Configuration**: `SkipperConfig` loaded from file and environment
//! - **Error Handling**: Unified `SkipperError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use skipper_core::{EpisodeKey, MarkerSource, SkipMarker, SkipType};
//!
//! let key = EpisodeKey::new("tt0903747", 1, 2);
//! assert_eq!(key.to_string(), "tt0903747_s01e02");
//!
//! let intro = SkipMarker::new(SkipType::Intro, 12.0, 72.5, MarkerSource::Fingerprint).unwrap();
//! assert!(intro.contains(12.0));
//! assert!(!intro.contains(72.5));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::SkipperConfig;
pub use error::{Result, SkipperError};
pub use storage::{MemorySettingsStore, SettingsStore, SettingsStoreExt};
pub use traits::{Clock, ManualClock, PlaybackPrimitive, PlaybackSample, SystemClock};

pub use types::{
    playback_position_key, EpisodeKey, ManualSkipOverride, MarkerSource, ScrobbleCredentials,
    SkipMarker, SkipSettings, SkipType,
};
