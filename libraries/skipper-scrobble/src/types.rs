//! Wire types for the watch-history API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scrobble endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrobbleAction {
    /// Playback started or resumed
    Start,
    /// Playback paused
    Pause,
    /// Playback stopped, or the completion report
    Stop,
}

impl ScrobbleAction {
    /// Path segment under `/scrobble/`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for ScrobbleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers the service accepts for a show or movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaIds {
    /// IMDb id (`tt…`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb: Option<String>,
    /// TMDB id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<u64>,
    /// The service's own id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trakt: Option<u64>,
}

impl MediaIds {
    /// Ids with only an IMDb id
    pub fn imdb(id: impl Into<String>) -> Self {
        Self {
            imdb: Some(id.into()),
            ..Self::default()
        }
    }
}

/// What is being watched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaIdentity {
    /// An episode of a show
    Episode {
        /// Ids of the show, not the episode
        show_ids: MediaIds,
        /// Season number
        season: u32,
        /// Episode number within the season
        episode: u32,
    },
    /// A movie
    Movie {
        /// Movie ids
        ids: MediaIds,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct IdsBody<'a> {
    ids: &'a MediaIds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct EpisodeBody {
    season: u32,
    number: u32,
}

/// Request body for `/scrobble/{action}`
///
/// Serializes as `{"show":{"ids":…},"episode":{"season":…,"number":…},"progress":…}`
/// for episodes and `{"movie":{"ids":…},"progress":…}` for movies.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrobblePayload {
    media: MediaIdentity,
    progress: f64,
}

impl ScrobblePayload {
    /// Build a payload; progress is clamped to `0..=100`
    pub fn new(media: MediaIdentity, progress: f64) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self { media, progress }
    }

    /// Media identity
    pub fn media(&self) -> &MediaIdentity {
        &self.media
    }

    /// Progress percentage
    pub fn progress(&self) -> f64 {
        self.progress
    }
}

impl Serialize for ScrobblePayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match &self.media {
            MediaIdentity::Episode {
                show_ids,
                season,
                episode,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("show", &IdsBody { ids: show_ids })?;
                map.serialize_entry(
                    "episode",
                    &EpisodeBody {
                        season: *season,
                        number: *episode,
                    },
                )?;
                map.serialize_entry("progress", &self.progress)?;
                map.end()
            }
            MediaIdentity::Movie { ids } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("movie", &IdsBody { ids })?;
                map.serialize_entry("progress", &self.progress)?;
                map.end()
            }
        }
    }
}

/// OAuth refresh request
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'a str,
}

/// OAuth token response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// New bearer token
    pub access_token: String,
    /// Replacement refresh token
    pub refresh_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}
