/// Core collaborator traits for Skipper
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Video playback primitive
///
/// The only surface the skip engine depends on. Implementers wrap the
/// platform player; the engine samples `current_time`/`duration` periodically
/// and writes `current_time` only when performing a skip.
pub trait PlaybackPrimitive: Send {
    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Seek to `seconds`
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds (0 while nothing is loaded)
    fn duration(&self) -> f64;

    /// Playback speed multiplier
    fn playback_rate(&self) -> f64;

    /// Change the playback speed multiplier
    fn set_playback_rate(&mut self, rate: f64);

    /// Resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);
}

/// A single position/duration reading taken from the playback primitive
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackSample {
    /// Position in seconds
    pub position: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl PlaybackSample {
    /// Progress as a percentage (0 when the duration is unknown)
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// Wall-clock source
///
/// Cache expiry and token refresh read time through this trait so tests can
/// control it.
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and simulations
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Set the current time
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move the clock forward
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = *now + by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
