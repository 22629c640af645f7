//! Per-session scrobble sequencing
//!
//! Turns playback lifecycle calls and position samples into start, pause and
//! stop scrobbles. Every operation is a silent no-op while signed out.

use crate::api::ScrobbleApi;
use crate::types::{MediaIdentity, ScrobbleAction, ScrobblePayload};
use skipper_core::config::ScrobbleSettings;
use skipper_core::PlaybackSample;
use tracing::{debug, info};

/// Progress percentage reported as completion by default
pub const DEFAULT_COMPLETION_THRESHOLD: f64 = 80.0;

/// Sequencer flags for one playback session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequencerState {
    /// The service believes playback is running
    pub remote_playing: bool,
    /// A start was accepted during this session
    pub started: bool,
    /// The completion report was accepted
    pub completion_reported: bool,
    /// Last sampled progress percentage
    pub last_progress: f64,
}

/// Start/pause/stop protocol for one playback session.
pub struct ScrobbleSequencer<A> {
    api: A,
    media: MediaIdentity,
    state: SequencerState,
    threshold: f64,
}

impl<A: ScrobbleApi> ScrobbleSequencer<A> {
    /// Create a sequencer for `media`
    pub fn new(api: A, media: MediaIdentity) -> Self {
        Self {
            api,
            media,
            state: SequencerState::default(),
            threshold: DEFAULT_COMPLETION_THRESHOLD,
        }
    }

    /// Create a sequencer using the configured completion threshold
    pub fn from_settings(api: A, media: MediaIdentity, settings: &ScrobbleSettings) -> Self {
        Self::new(api, media).with_threshold(settings.completion_threshold)
    }

    /// Override the completion threshold (percent)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Session flags
    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// What is being watched
    pub fn media(&self) -> &MediaIdentity {
        &self.media
    }

    /// Underlying service
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Playback started or resumed.
    ///
    /// Fires once per session; after a pause it re-issues start with the last
    /// known progress. Ignored while the service already believes playback is
    /// running.
    pub async fn start(&mut self) -> bool {
        if self.state.remote_playing {
            debug!("Scrobble already started");
            return false;
        }
        if !self.api.is_authenticated().await {
            return false;
        }

        let resume = self.state.started;
        let accepted = self.send(ScrobbleAction::Start, self.state.last_progress).await;
        if accepted {
            self.state.remote_playing = true;
            self.state.started = true;
            info!(resume, progress = self.state.last_progress, "Scrobble started");
        }
        accepted
    }

    /// Playback paused. Only sent while the service believes playback is running.
    pub async fn pause(&mut self) -> bool {
        if !self.state.remote_playing {
            return false;
        }
        self.state.remote_playing = false;

        if !self.api.is_authenticated().await {
            return false;
        }
        self.send(ScrobbleAction::Pause, self.state.last_progress)
            .await
    }

    /// Playback ended. Always attempted; the remote flag is cleared regardless.
    pub async fn stop(&mut self) -> bool {
        self.state.remote_playing = false;

        if !self.api.is_authenticated().await {
            return false;
        }
        self.send(ScrobbleAction::Stop, self.state.last_progress)
            .await
    }

    /// Record a position sample.
    ///
    /// The first sample at or past the threshold sends the completion report
    /// through the stop endpoint. It is marked done only once the service
    /// accepts it, so a rejected report is retried on the next sample.
    pub async fn on_progress(&mut self, sample: PlaybackSample) -> bool {
        if !(sample.duration > 0.0) || !sample.position.is_finite() {
            return false;
        }

        let progress = sample.progress_percent();
        self.state.last_progress = progress;

        if self.state.completion_reported || progress < self.threshold {
            return false;
        }
        if !self.api.is_authenticated().await {
            return false;
        }

        let accepted = self.send(ScrobbleAction::Stop, progress).await;
        if accepted {
            self.state.completion_reported = true;
            info!(progress, "Completion reported");
        }
        accepted
    }

    /// End the current session and begin a new one for `media`.
    ///
    /// The current session is always stopped first.
    pub async fn reset(&mut self, media: MediaIdentity) {
        self.stop().await;
        self.state = SequencerState::default();
        self.media = media;
    }

    async fn send(&self, action: ScrobbleAction, progress: f64) -> bool {
        let payload = ScrobblePayload::new(self.media.clone(), progress);
        self.api.scrobble(action, &payload).await
    }
}
