//! Intro-detection service provider.

use super::{build_http_client, get_json, normalize_base_url, probe};
use crate::adapter::markers_from_response;
use crate::error::Result;
use crate::provider::MarkerProvider;
use async_trait::async_trait;
use reqwest::Client;
use skipper_core::{EpisodeKey, SkipMarker};
use std::time::Duration;
use tracing::debug;

const NAME: &str = "introdb";

/// Intro-detection service, queried by IMDb id, season and episode.
///
/// `GET {base}/segments?imdb_id=tt..&season=1&episode=2`
pub struct IntroDbProvider {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl IntroDbProvider {
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
}

#[async_trait]
impl MarkerProvider for IntroDbProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn test_connection(&self) -> Result<bool> {
        probe(&self.http, &self.base_url, self.timeout).await
    }

    async fn fetch_markers(&self, episode: &EpisodeKey) -> Result<Vec<SkipMarker>> {
        let url = format!("{}/segments", self.base_url);
        debug!(provider = NAME, url = %url, episode = %episode, "Fetching markers");

        let request = self.http.get(&url).query(&[
            ("imdb_id", episode.imdb_id.clone()),
            ("season", episode.season.to_string()),
            ("episode", episode.episode.to_string()),
        ]);

        let markers = get_json(request, NAME, self.timeout)
            .await?
            .map(|body| markers_from_response(&body))
            .unwrap_or_default();

        debug!(provider = NAME, episode = %episode, count = markers.len(), "Fetched markers");
        Ok(markers)
    }
}
