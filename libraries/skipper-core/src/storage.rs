//! Settings storage abstraction
//!
//! Skipper never owns persistence. Hosts provide a string key/value store and
//! the typed helpers in [`SettingsStoreExt`] handle (de)serialization and the
//! key formats.

use crate::error::Result;
use crate::types::{
    playback_position_key, EpisodeKey, ManualSkipOverride, ScrobbleCredentials, SkipSettings,
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::warn;

/// Storage key of the global [`SkipSettings`]
pub const SKIP_SETTINGS_KEY: &str = "skip_settings";

/// Storage key of the watch-history [`ScrobbleCredentials`]
pub const SCROBBLE_CREDENTIALS_KEY: &str = "scrobble_credentials";

/// Asynchronous key/value settings store (last write wins)
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a raw value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a raw value
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Delete a value (no-op if absent)
    async fn remove(&self, key: &str) -> Result<()>;
}

async fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: SettingsStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key = %key, error = %e, "Ignoring corrupt settings value");
            Ok(None)
        }
    }
}

async fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: SettingsStore + ?Sized,
    T: Serialize + Sync,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

/// Typed accessors over any [`SettingsStore`]
#[async_trait]
pub trait SettingsStoreExt: SettingsStore {
    /// Global skip settings (defaults when never saved)
    async fn load_skip_settings(&self) -> Result<SkipSettings> {
        Ok(load_json(self, SKIP_SETTINGS_KEY).await?.unwrap_or_default())
    }

    /// Persist global skip settings
    async fn save_skip_settings(&self, settings: &SkipSettings) -> Result<()> {
        save_json(self, SKIP_SETTINGS_KEY, settings).await
    }

    /// Per-episode manual override, if one was saved
    async fn load_manual_override(&self, key: &EpisodeKey) -> Result<Option<ManualSkipOverride>> {
        load_json(self, &key.manual_skip_key()).await
    }

    /// Persist a per-episode manual override
    async fn save_manual_override(
        &self,
        key: &EpisodeKey,
        manual: &ManualSkipOverride,
    ) -> Result<()> {
        save_json(self, &key.manual_skip_key(), manual).await
    }

    /// Watch-history credentials, if signed in
    async fn load_credentials(&self) -> Result<Option<ScrobbleCredentials>> {
        load_json(self, SCROBBLE_CREDENTIALS_KEY).await
    }

    /// Persist watch-history credentials
    async fn save_credentials(&self, credentials: &ScrobbleCredentials) -> Result<()> {
        save_json(self, SCROBBLE_CREDENTIALS_KEY, credentials).await
    }

    /// Forget watch-history credentials
    async fn clear_credentials(&self) -> Result<()> {
        self.remove(SCROBBLE_CREDENTIALS_KEY).await
    }

    /// Last saved resume position for a video URI
    async fn load_playback_position(&self, video_uri: &str) -> Result<Option<f64>> {
        load_json(self, &playback_position_key(video_uri)).await
    }

    /// Save the resume position for a video URI
    async fn save_playback_position(&self, video_uri: &str, seconds: f64) -> Result<()> {
        save_json(self, &playback_position_key(video_uri), &seconds).await
    }
}

impl<T: SettingsStore + ?Sized> SettingsStoreExt for T {}

/// In-memory settings store
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
