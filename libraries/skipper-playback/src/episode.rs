//! Per-episode input loading and position persistence

use crate::types::{EpisodeInputs, PreparedEpisode};
use skipper_core::{EpisodeKey, PlaybackSample, SettingsStore, SettingsStoreExt};
use skipper_markers::MarkerAggregator;
use tracing::{debug, info, warn};

/// Load everything a session needs for one episode.
///
/// Never fails. Storage errors fall back to defaults and are logged. Community
/// markers are only fetched when the community toggle is on and the episode has
/// a key.
pub async fn prepare_episode<S>(
    store: &S,
    aggregator: &MarkerAggregator,
    key: Option<&EpisodeKey>,
    video_uri: &str,
) -> PreparedEpisode
where
    S: SettingsStore + ?Sized,
{
    let settings = store.load_skip_settings().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load skip settings, using defaults");
        Default::default()
    });

    let manual_override = match key {
        Some(key) => store.load_manual_override(key).await.unwrap_or_else(|e| {
            warn!(episode = %key, error = %e, "Failed to load manual skip override");
            None
        }),
        None => None,
    };

    let community_markers = match key {
        Some(key) if settings.enabled_community_skip => aggregator.get_markers(key).await,
        _ => Vec::new(),
    };

    let resume_position = store
        .load_playback_position(video_uri)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load playback position");
            None
        });

    info!(
        episode = ?key.map(ToString::to_string),
        markers = community_markers.len(),
        manual_override = manual_override.is_some(),
        resume = ?resume_position,
        "Prepared episode"
    );

    PreparedEpisode {
        settings,
        inputs: EpisodeInputs {
            key: key.cloned(),
            community_markers,
            manual_override,
        },
        resume_position,
    }
}

/// Save the position of `sample` as the resume point for `video_uri`.
///
/// Samples taken before the video loaded are ignored.
pub async fn persist_position<S>(
    store: &S,
    video_uri: &str,
    sample: PlaybackSample,
) -> skipper_core::Result<()>
where
    S: SettingsStore + ?Sized,
{
    if !(sample.duration > 0.0) || !sample.position.is_finite() {
        debug!(video_uri, "Skipping position save for unloaded video");
        return Ok(());
    }

    store
        .save_playback_position(video_uri, sample.position.max(0.0))
        .await
}
