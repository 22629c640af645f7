//! Playback session
//!
//! Owns the active marker and the auto-skip countdown for one player. All
//! state here belongs to a single session and is never shared.

use crate::countdown::{AutoSkipCountdown, Observation, Tick};
use crate::events::SessionEvent;
use crate::resolver::resolve;
use crate::types::{EpisodeInputs, PreparedEpisode, ResolutionSnapshot, SourceToggles};
use skipper_core::{PlaybackPrimitive, PlaybackSample, SkipMarker, SkipSettings};
use tracing::{debug, info};

/// Skip state for one playback primitive.
///
/// Every operation returns the events it caused, in order.
pub struct PlaybackSession<P> {
    player: P,
    settings: SkipSettings,
    inputs: EpisodeInputs,
    active: Option<SkipMarker>,
    countdown: AutoSkipCountdown,
    /// Marker just skipped; ignored until a sample sees it inactive
    suppressed: Option<SkipMarker>,
    last_sample: PlaybackSample,
}

impl<P: PlaybackPrimitive> PlaybackSession<P> {
    /// Create a session with no episode loaded
    pub fn new(player: P, settings: SkipSettings) -> Self {
        Self {
            player,
            settings,
            inputs: EpisodeInputs::default(),
            active: None,
            countdown: AutoSkipCountdown::new(),
            suppressed: None,
            last_sample: PlaybackSample::default(),
        }
    }

    /// Create a session from a prepared episode, seeking to its resume position
    pub fn from_prepared(mut player: P, prepared: PreparedEpisode) -> Self {
        if let Some(position) = prepared.resume_position.filter(|p| *p > 0.0) {
            debug!(position, "Resuming playback");
            player.set_current_time(position);
        }

        let mut session = Self::new(player, prepared.settings);
        session.inputs = prepared.inputs;
        session
    }

    /// Sample the player and re-resolve the active marker
    pub fn sample(&mut self) -> Vec<SessionEvent> {
        let sample = PlaybackSample {
            position: self.player.current_time(),
            duration: self.player.duration(),
        };
        self.last_sample = sample;

        let mut events = vec![SessionEvent::PositionSampled {
            position: sample.position,
            duration: sample.duration,
        }];
        self.reevaluate(&mut events);
        events
    }

    /// Advance the auto-skip countdown by one interval
    pub fn countdown_tick(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        match self.countdown.tick() {
            Tick::Idle => {}
            Tick::Remaining(remaining) => {
                debug!(remaining, "Auto-skip countdown");
                events.push(SessionEvent::CountdownTick { remaining });
            }
            Tick::Skip(marker) => self.perform_skip(marker, true, &mut events),
        }

        events
    }

    /// User-triggered skip of the active marker.
    ///
    /// Available whenever a marker is active, regardless of the countdown.
    /// Does nothing when no marker is active.
    pub fn skip_now(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if let Some(marker) = self.active.clone() {
            self.perform_skip(marker, false, &mut events);
        }
        events
    }

    /// Replace the episode inputs, clearing all marker state
    pub fn load_episode(&mut self, inputs: EpisodeInputs) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.clear_state(&mut events);

        info!(
            episode = ?inputs.key.as_ref().map(ToString::to_string),
            markers = inputs.community_markers.len(),
            manual_override = inputs.manual_override.is_some(),
            "Loaded episode into session"
        );
        self.inputs = inputs;
        events
    }

    /// Apply new skip settings and re-resolve against the last sample
    pub fn update_settings(&mut self, settings: SkipSettings) -> Vec<SessionEvent> {
        self.settings = settings;
        let mut events = Vec::new();
        self.reevaluate(&mut events);
        events
    }

    /// New video load: drop the active marker and any countdown
    pub fn reset(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.clear_state(&mut events);
        self.last_sample = PlaybackSample::default();
        events
    }

    /// Currently active marker
    pub fn active_marker(&self) -> Option<&SkipMarker> {
        self.active.as_ref()
    }

    /// Countdown ticks left, if counting
    pub fn countdown(&self) -> Option<u32> {
        self.countdown.remaining()
    }

    /// Current skip settings
    pub fn settings(&self) -> &SkipSettings {
        &self.settings
    }

    /// Current episode inputs
    pub fn inputs(&self) -> &EpisodeInputs {
        &self.inputs
    }

    /// Most recent position sample
    pub fn last_sample(&self) -> PlaybackSample {
        self.last_sample
    }

    /// Underlying player
    pub fn player(&self) -> &P {
        &self.player
    }

    /// Underlying player, mutably
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Give the player back
    pub fn into_player(self) -> P {
        self.player
    }

    fn reevaluate(&mut self, events: &mut Vec<SessionEvent>) {
        let (manual_intro_seconds, manual_credits_seconds) =
            self.inputs.manual_seconds(&self.settings);

        let resolved = resolve(&ResolutionSnapshot {
            position: self.last_sample.position,
            duration: self.last_sample.duration,
            community_markers: &self.inputs.community_markers,
            manual_intro_seconds,
            manual_credits_seconds,
            toggles: SourceToggles::from(&self.settings),
        });

        let resolved = if resolved.is_some() && resolved == self.suppressed {
            None
        } else {
            self.suppressed = None;
            resolved
        };

        if resolved != self.active {
            if let Some(previous) = self.active.take() {
                debug!(marker = %previous, "Marker cleared");
                events.push(SessionEvent::MarkerCleared { marker: previous });
            }
            if let Some(marker) = &resolved {
                debug!(marker = %marker, "Marker activated");
                events.push(SessionEvent::MarkerActivated {
                    marker: marker.clone(),
                });
            }
            self.active = resolved;
        }

        let observation = self
            .countdown
            .observe(self.active.as_ref(), self.settings.auto_skip);
        push_observation(observation, events);
    }

    fn perform_skip(&mut self, marker: SkipMarker, auto: bool, events: &mut Vec<SessionEvent>) {
        if !auto {
            push_observation(self.countdown.cancel(), events);
        }

        info!(marker = %marker, auto, target = marker.end_time(), "Skipping segment");
        self.player.set_current_time(marker.end_time());

        self.active = None;
        self.suppressed = Some(marker.clone());
        events.push(SessionEvent::Skipped { marker, auto });
    }

    fn clear_state(&mut self, events: &mut Vec<SessionEvent>) {
        push_observation(self.countdown.cancel(), events);
        if let Some(previous) = self.active.take() {
            events.push(SessionEvent::MarkerCleared { marker: previous });
        }
        self.suppressed = None;
    }
}

fn push_observation(observation: Observation, events: &mut Vec<SessionEvent>) {
    match observation {
        Observation::Unchanged => {}
        Observation::Started { remaining } => {
            events.push(SessionEvent::CountdownStarted { remaining });
        }
        Observation::Cancelled => events.push(SessionEvent::CountdownCancelled),
        Observation::Restarted { remaining } => {
            events.push(SessionEvent::CountdownCancelled);
            events.push(SessionEvent::CountdownStarted { remaining });
        }
    }
}
