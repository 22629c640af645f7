//! Domain types shared across Skipper crates

mod episode;
mod marker;
mod settings;

pub use episode::{playback_position_key, EpisodeKey};
pub use marker::{MarkerSource, SkipMarker, SkipType};
pub use settings::{ManualSkipOverride, ScrobbleCredentials, SkipSettings};
