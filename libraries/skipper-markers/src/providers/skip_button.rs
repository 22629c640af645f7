//! Community skip-button service provider.

use super::{build_http_client, get_json, normalize_base_url, probe};
use crate::adapter::markers_from_response;
use crate::error::Result;
use crate::provider::MarkerProvider;
use async_trait::async_trait;
use reqwest::Client;
use skipper_core::{EpisodeKey, SkipMarker};
use std::time::Duration;
use tracing::debug;

const NAME: &str = "skipbutton";

/// Community skip-button service, keyed by a composite episode id.
///
/// `GET {base}/skip/{imdbId}:{season}:{episode}`
pub struct SkipButtonProvider {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl SkipButtonProvider {
    /// Create a provider with its own HTTP client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::with_client(build_http_client(timeout)?, base_url, timeout)
    }

    /// Create a provider sharing an existing HTTP client
    pub fn with_client(http: Client, base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            timeout,
        })
    }

    fn episode_id(episode: &EpisodeKey) -> String {
        format!("{}:{}:{}", episode.imdb_id, episode.season, episode.episode)
    }
}

#[async_trait]
impl MarkerProvider for SkipButtonProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn test_connection(&self) -> Result<bool> {
        probe(&self.http, &self.base_url, self.timeout).await
    }

    async fn fetch_markers(&self, episode: &EpisodeKey) -> Result<Vec<SkipMarker>> {
        let url = format!("{}/skip/{}", self.base_url, Self::episode_id(episode));
        debug!(provider = NAME, url = %url, "Fetching markers");

        let markers = get_json(self.http.get(&url), NAME, self.timeout)
            .await?
            .map(|body| markers_from_response(&body))
            .unwrap_or_default();

        debug!(provider = NAME, episode = %episode, count = markers.len(), "Fetched markers");
        Ok(markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_episode_id() {
        let key = EpisodeKey::new("tt0903747", 2, 13);
        assert_eq!(SkipButtonProvider::episode_id(&key), "tt0903747:2:13");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(SkipButtonProvider::new("", Duration::from_secs(5)).is_err());
        assert!(SkipButtonProvider::new("skip.example.com", Duration::from_secs(5)).is_err());
        assert!(
            SkipButtonProvider::new("https://skip.example.com/", Duration::from_secs(5)).is_ok()
        );
    }
}
