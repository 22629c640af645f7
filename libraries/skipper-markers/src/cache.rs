//! Time-boxed per-episode marker cache

use chrono::{DateTime, Duration, Utc};
use skipper_core::SkipMarker;
use std::collections::HashMap;

/// Cached aggregation result for one episode
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Merged markers, in merge order
    pub markers: Vec<SkipMarker>,
    /// When the aggregation completed
    pub fetched_at: DateTime<Utc>,
}

/// Aggregated markers keyed by episode key string
///
/// Entries are fully replaced on refresh, never merged. An entry whose age is
/// at least the TTL is stale.
#[derive(Debug, Clone)]
pub struct MarkerCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MarkerCache {
    /// Create an empty cache with the given entry lifetime
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Markers for `key` if the entry is younger than the TTL at `now`
    pub fn get_fresh(&self, key: &str, now: DateTime<Utc>) -> Option<&[SkipMarker]> {
        let entry = self.entries.get(key)?;
        if now - entry.fetched_at < self.ttl {
            Some(&entry.markers)
        } else {
            None
        }
    }

    /// Store (or replace) the entry for `key`
    pub fn insert(&mut self, key: String, markers: Vec<SkipMarker>, fetched_at: DateTime<Utc>) {
        self.entries.insert(
            key,
            CacheEntry {
                markers,
                fetched_at,
            },
        );
    }

    /// Raw entry access, regardless of freshness
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries (fresh or stale)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for MarkerCache {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}
