//! Marker provider capability

use crate::error::Result;
use async_trait::async_trait;
use skipper_core::{EpisodeKey, SkipMarker};

/// A community service that supplies skip markers for episodes.
///
/// One implementation per backend. The aggregator owns a list of providers;
/// list order is merge precedence.
#[async_trait]
pub trait MarkerProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Check that the service is reachable
    async fn test_connection(&self) -> Result<bool>;

    /// Fetch the markers the service knows for an episode
    ///
    /// Returns an empty list when the service has no data for the episode.
    async fn fetch_markers(&self, episode: &EpisodeKey) -> Result<Vec<SkipMarker>>;
}
