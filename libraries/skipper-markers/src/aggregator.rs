//! Concurrent marker aggregation across community providers.

use crate::cache::MarkerCache;
use crate::error::Result;
use crate::provider::MarkerProvider;
use crate::providers::{build_http_client, IntroDbProvider, SkipButtonProvider};
use futures_util::future::join_all;
use skipper_core::{Clock, EpisodeKey, SkipMarker, SkipperConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Two markers of the same type whose starts differ by less than this are
/// the same real-world segment.
pub const DEDUP_TOLERANCE_SECS: f64 = 2.0;

const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Merge per-provider marker lists in precedence order.
///
/// The first list is the base. Each marker of a later list is appended unless
/// an already merged marker of the same type starts within
/// [`DEDUP_TOLERANCE_SECS`]. End times are not compared.
pub fn merge_markers(lists: impl IntoIterator<Item = Vec<SkipMarker>>) -> Vec<SkipMarker> {
    let mut merged: Vec<SkipMarker> = Vec::new();

    for list in lists {
        for marker in list {
            let duplicate = merged.iter().any(|existing| {
                existing.kind() == marker.kind()
                    && (existing.start_time() - marker.start_time()).abs() < DEDUP_TOLERANCE_SECS
            });
            if !duplicate {
                merged.push(marker);
            }
        }
    }

    merged
}

/// Fetches, merges, and caches community markers per episode.
///
/// The cache is owned exclusively by the aggregator. The lock is never held
/// across a provider call, so `clear_cache` can run while a fetch is in
/// flight; that fetch still stores its result when it completes.
pub struct MarkerAggregator {
    providers: Vec<Arc<dyn MarkerProvider>>,
    cache: RwLock<MarkerCache>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl MarkerAggregator {
    /// Create an aggregator over `providers` (list order is precedence)
    pub fn new(providers: Vec<Arc<dyn MarkerProvider>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            providers,
            cache: RwLock::new(MarkerCache::default()),
            clock,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Build the default provider pair from configuration
    pub fn from_config(config: &SkipperConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let timeout = config.providers.timeout();
        let http = build_http_client(timeout)?;

        let providers: Vec<Arc<dyn MarkerProvider>> = vec![
            Arc::new(IntroDbProvider::with_client(
                http.clone(),
                &config.providers.intro_db_url,
                timeout,
            )?),
            Arc::new(SkipButtonProvider::with_client(
                http,
                &config.providers.skip_button_url,
                timeout,
            )?),
        ];

        Ok(Self::new(providers, clock)
            .with_timeout(timeout)
            .with_ttl(config.cache.ttl()))
    }

    /// Override the per-provider timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the cache entry lifetime
    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.cache = RwLock::new(MarkerCache::new(ttl));
        self
    }

    /// Configured providers, in precedence order
    pub fn providers(&self) -> &[Arc<dyn MarkerProvider>] {
        &self.providers
    }

    /// Markers for an episode, from cache when fresh
    pub async fn get_markers_for_episode(
        &self,
        imdb_id: &str,
        season: u32,
        episode: u32,
    ) -> Vec<SkipMarker> {
        self.get_markers(&EpisodeKey::new(imdb_id, season, episode))
            .await
    }

    /// Markers for an episode, from cache when fresh.
    ///
    /// Never fails: provider errors and timeouts are logged and contribute no
    /// markers.
    pub async fn get_markers(&self, episode: &EpisodeKey) -> Vec<SkipMarker> {
        let key = episode.to_string();

        {
            let cache = self.cache.read().await;
            if let Some(markers) = cache.get_fresh(&key, self.clock.now()) {
                debug!(episode = %key, count = markers.len(), "Marker cache hit");
                return markers.to_vec();
            }
        }

        let results = self.fetch_all(episode).await;
        let answered = results.iter().filter(|r| r.is_some()).count();

        if answered == 0 && !self.providers.is_empty() {
            warn!(episode = %key, "All marker providers failed");
            return Vec::new();
        }

        let merged = merge_markers(results.into_iter().flatten());

        info!(
            episode = %key,
            providers = answered,
            markers = merged.len(),
            "Aggregated community markers"
        );

        self.cache
            .write()
            .await
            .insert(key, merged.clone(), self.clock.now());

        merged
    }

    /// Query every provider concurrently; `None` marks a failed provider
    async fn fetch_all(&self, episode: &EpisodeKey) -> Vec<Option<Vec<SkipMarker>>> {
        let timeout = self.timeout;

        let fetches = self.providers.iter().map(|provider| async move {
            match tokio::time::timeout(timeout, provider.fetch_markers(episode)).await {
                Ok(Ok(markers)) => Some(markers),
                Ok(Err(e)) => {
                    warn!(
                        provider = provider.name(),
                        episode = %episode,
                        error = %e,
                        "Marker provider failed"
                    );
                    None
                }
                Err(_) => {
                    warn!(
                        provider = provider.name(),
                        episode = %episode,
                        timeout = ?timeout,
                        "Marker provider timed out"
                    );
                    None
                }
            }
        });

        join_all(fetches).await
    }

    /// Drop every cached entry
    pub async fn clear_cache(&self) {
        let mut cache = self.cache.write().await;
        let dropped = cache.len();
        cache.clear();
        info!(dropped, "Cleared marker cache");
    }

    /// Number of cached episodes (fresh or stale)
    pub async fn cached_episode_count(&self) -> usize {
        self.cache.read().await.len()
    }
}
