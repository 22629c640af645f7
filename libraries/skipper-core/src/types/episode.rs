//! Episode identity and storage key formats

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a single episode: `(imdbId, season, episode)`
///
/// Renders as `imdbId_sSSeEE`, which is both the aggregated marker cache key
/// and the suffix of the manual override storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeKey {
    /// IMDb id of the show (e.g. "tt0903747")
    pub imdb_id: String,
    /// Season number
    pub season: u32,
    /// Episode number within the season
    pub episode: u32,
}

impl EpisodeKey {
    /// Create a new episode key
    pub fn new(imdb_id: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            season,
            episode,
        }
    }

    /// Storage key of the per-episode manual skip override
    pub fn manual_skip_key(&self) -> String {
        format!("manual_skip_{self}")
    }
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_s{:02}e{:02}", self.imdb_id, self.season, self.episode)
    }
}

/// Storage key of the resume position for a video URI (percent-encoded URI)
pub fn playback_position_key(video_uri: &str) -> String {
    urlencoding::encode(video_uri).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pads_season_and_episode() {
        let key = EpisodeKey::new("tt0903747", 1, 2);
        assert_eq!(key.to_string(), "tt0903747_s01e02");
        assert_eq!(key.manual_skip_key(), "manual_skip_tt0903747_s01e02");
    }

    #[test]
    fn wide_numbers_are_not_truncated() {
        let key = EpisodeKey::new("tt0388629", 21, 1071);
        assert_eq!(key.to_string(), "tt0388629_s21e1071");
    }

    #[test]
    fn position_key_encodes_uri() {
        let key = playback_position_key("https://cdn.example.com/show s1/ep 1.mkv?token=a&b=c");
        assert!(!key.contains('/'));
        assert!(!key.contains(' '));
        assert!(!key.contains('&'));
        assert!(key.starts_with("https%3A%2F%2Fcdn.example.com"));
    }
}
