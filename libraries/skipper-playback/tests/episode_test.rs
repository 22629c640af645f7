//! Episode preparation tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use skipper_core::{
    EpisodeKey, ManualClock, ManualSkipOverride, MarkerSource, MemorySettingsStore,
    PlaybackSample, SettingsStore, SettingsStoreExt, SkipMarker, SkipSettings, SkipType,
};
use skipper_markers::{MarkerAggregator, MarkerProvider};
use skipper_playback::{persist_position, prepare_episode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ===== Test Helpers =====

struct CountingProvider {
    markers: Vec<SkipMarker>,
    calls: AtomicUsize,
}

#[async_trait]
impl MarkerProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    async fn test_connection(&self) -> skipper_markers::Result<bool> {
        Ok(true)
    }

    async fn fetch_markers(
        &self,
        _episode: &EpisodeKey,
    ) -> skipper_markers::Result<Vec<SkipMarker>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.markers.clone())
    }
}

/// Store whose every operation fails
struct BrokenStore;

#[async_trait]
impl SettingsStore for BrokenStore {
    async fn get(&self, _key: &str) -> skipper_core::Result<Option<String>> {
        Err(skipper_core::SkipperError::storage("disk gone"))
    }

    async fn set(&self, _key: &str, _value: String) -> skipper_core::Result<()> {
        Err(skipper_core::SkipperError::storage("disk gone"))
    }

    async fn remove(&self, _key: &str) -> skipper_core::Result<()> {
        Err(skipper_core::SkipperError::storage("disk gone"))
    }
}

fn intro() -> SkipMarker {
    SkipMarker::new(SkipType::Intro, 12.0, 72.0, MarkerSource::Fingerprint).unwrap()
}

fn aggregator() -> (Arc<CountingProvider>, MarkerAggregator) {
    let provider = Arc::new(CountingProvider {
        markers: vec![intro()],
        calls: AtomicUsize::new(0),
    });
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap()));
    let providers: Vec<Arc<dyn MarkerProvider>> = vec![provider.clone()];
    let aggregator = MarkerAggregator::new(providers, clock);
    (provider, aggregator)
}

fn key() -> EpisodeKey {
    EpisodeKey::new("tt0903747", 2, 5)
}

const URI: &str = "https://cdn.example.com/show/s02e05.mkv";

// ===== prepare_episode =====

#[tokio::test]
async fn test_defaults_fetch_community_markers() {
    let store = MemorySettingsStore::new();
    let (provider, aggregator) = aggregator();

    let prepared = prepare_episode(&store, &aggregator, Some(&key()), URI).await;

    assert_eq!(prepared.settings, SkipSettings::default());
    assert_eq!(prepared.inputs.key, Some(key()));
    assert_eq!(prepared.inputs.community_markers, vec![intro()]);
    assert!(prepared.inputs.manual_override.is_none());
    assert!(prepared.resume_position.is_none());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_community_disabled_skips_aggregation() {
    let store = MemorySettingsStore::new();
    store
        .save_skip_settings(&SkipSettings {
            enabled_community_skip: false,
            enabled_manual_skip: true,
            intro_skip_seconds: 85.0,
            ..SkipSettings::default()
        })
        .await
        .unwrap();
    let (provider, aggregator) = aggregator();

    let prepared = prepare_episode(&store, &aggregator, Some(&key()), URI).await;

    assert!(prepared.inputs.community_markers.is_empty());
    assert_eq!(prepared.settings.intro_skip_seconds, 85.0);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_loads_manual_override_and_resume_position() {
    let store = MemorySettingsStore::new();
    let manual = ManualSkipOverride {
        intro_skip_seconds: 40.0,
        credits_skip_seconds: 75.0,
    };
    store.save_manual_override(&key(), &manual).await.unwrap();
    store.save_playback_position(URI, 512.5).await.unwrap();
    let (_, aggregator) = aggregator();

    let prepared = prepare_episode(&store, &aggregator, Some(&key()), URI).await;

    assert_eq!(prepared.inputs.manual_override, Some(manual));
    assert_eq!(prepared.resume_position, Some(512.5));
}

#[tokio::test]
async fn test_without_key_uses_no_markers() {
    let store = MemorySettingsStore::new();
    let (provider, aggregator) = aggregator();

    let prepared = prepare_episode(&store, &aggregator, None, URI).await;

    assert!(prepared.inputs.key.is_none());
    assert!(prepared.inputs.community_markers.is_empty());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_storage_failure_falls_back_to_defaults() {
    let (_, aggregator) = aggregator();

    let prepared = prepare_episode(&BrokenStore, &aggregator, Some(&key()), URI).await;

    assert_eq!(prepared.settings, SkipSettings::default());
    assert!(prepared.inputs.manual_override.is_none());
    assert!(prepared.resume_position.is_none());
    // Community skip is on by default, so markers still load
    assert_eq!(prepared.inputs.community_markers, vec![intro()]);
}

#[tokio::test]
async fn test_second_prepare_hits_cache() {
    let store = MemorySettingsStore::new();
    let (provider, aggregator) = aggregator();

    prepare_episode(&store, &aggregator, Some(&key()), URI).await;
    prepare_episode(&store, &aggregator, Some(&key()), URI).await;

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

// ===== persist_position =====

#[tokio::test]
async fn test_persist_position_round_trips() {
    let store = MemorySettingsStore::new();
    let sample = PlaybackSample {
        position: 321.0,
        duration: 1400.0,
    };

    persist_position(&store, URI, sample).await.unwrap();
    assert_eq!(store.load_playback_position(URI).await.unwrap(), Some(321.0));
}

#[tokio::test]
async fn test_persist_ignores_unloaded_video() {
    let store = MemorySettingsStore::new();
    let sample = PlaybackSample {
        position: 0.0,
        duration: 0.0,
    };

    persist_position(&store, URI, sample).await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_persist_surfaces_storage_errors() {
    let sample = PlaybackSample {
        position: 10.0,
        duration: 100.0,
    };

    assert!(persist_position(&BrokenStore, URI, sample).await.is_err());
}
