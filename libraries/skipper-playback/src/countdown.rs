//! Auto-skip countdown state machine
//!
//! Pure: no timers here. The session feeds it the resolved marker after every
//! sample and calls [`AutoSkipCountdown::tick`] once per countdown interval.

use skipper_core::SkipMarker;

/// Ticks between countdown start and the automatic skip
pub const COUNTDOWN_START: u32 = 3;

/// Countdown state
#[derive(Debug, Clone, PartialEq)]
pub enum CountdownState {
    /// Nothing to count down
    Idle,
    /// Counting down towards skipping `marker`
    Counting {
        /// Marker that will be skipped
        marker: SkipMarker,
        /// Ticks left before the skip
        remaining: u32,
    },
}

/// Result of observing the active marker
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// State did not change
    Unchanged,
    /// A new countdown began
    Started {
        /// Ticks left
        remaining: u32,
    },
    /// A running countdown was torn down without skipping
    Cancelled,
    /// The marker changed while counting; the old countdown was replaced
    Restarted {
        /// Ticks left
        remaining: u32,
    },
}

/// Result of one countdown tick
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Not counting
    Idle,
    /// Still counting
    Remaining(u32),
    /// Reached zero: skip to the end of this marker
    Skip(SkipMarker),
}

/// Counts down from [`COUNTDOWN_START`] while a marker stays active
#[derive(Debug, Clone)]
pub struct AutoSkipCountdown {
    state: CountdownState,
    start: u32,
}

impl AutoSkipCountdown {
    /// Create an idle countdown
    pub fn new() -> Self {
        Self::with_start(COUNTDOWN_START)
    }

    /// Create an idle countdown with a custom start value (minimum 1)
    pub fn with_start(start: u32) -> Self {
        Self {
            state: CountdownState::Idle,
            start: start.max(1),
        }
    }

    /// Current state
    pub fn state(&self) -> &CountdownState {
        &self.state
    }

    /// Ticks left, if counting
    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            CountdownState::Idle => None,
            CountdownState::Counting { remaining, .. } => Some(remaining),
        }
    }

    /// Whether a countdown is running
    pub fn is_counting(&self) -> bool {
        matches!(self.state, CountdownState::Counting { .. })
    }

    /// Feed the currently active marker.
    ///
    /// Starts a countdown on a new marker when auto-skip is enabled. Clears it
    /// when the marker goes away or auto-skip is turned off. The same marker
    /// observed again leaves a running countdown alone.
    pub fn observe(&mut self, active: Option<&SkipMarker>, auto_skip: bool) -> Observation {
        let Some(marker) = active.filter(|_| auto_skip) else {
            return self.cancel();
        };

        if let CountdownState::Counting { marker: current, .. } = &self.state {
            if current == marker {
                return Observation::Unchanged;
            }
        }

        let restarted = self.is_counting();
        self.begin(marker.clone());

        if restarted {
            Observation::Restarted {
                remaining: self.start,
            }
        } else {
            Observation::Started {
                remaining: self.start,
            }
        }
    }

    /// Advance by one interval
    pub fn tick(&mut self) -> Tick {
        let CountdownState::Counting { marker, remaining } = &mut self.state else {
            return Tick::Idle;
        };

        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return Tick::Remaining(*remaining);
        }

        let marker = marker.clone();
        self.state = CountdownState::Idle;
        Tick::Skip(marker)
    }

    /// Tear down a running countdown
    pub fn cancel(&mut self) -> Observation {
        if self.is_counting() {
            self.state = CountdownState::Idle;
            Observation::Cancelled
        } else {
            Observation::Unchanged
        }
    }

    fn begin(&mut self, marker: SkipMarker) {
        self.state = CountdownState::Counting {
            marker,
            remaining: self.start,
        };
    }
}

impl Default for AutoSkipCountdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skipper_core::{MarkerSource, SkipType};

    fn intro() -> SkipMarker {
        SkipMarker::new(SkipType::Intro, 30.0, 90.0, MarkerSource::Fingerprint).unwrap()
    }

    #[test]
    fn counts_down_then_skips_once() {
        let mut countdown = AutoSkipCountdown::new();
        assert_eq!(
            countdown.observe(Some(&intro()), true),
            Observation::Started { remaining: 3 }
        );

        assert_eq!(countdown.tick(), Tick::Remaining(2));
        assert_eq!(countdown.tick(), Tick::Remaining(1));
        assert_eq!(countdown.tick(), Tick::Skip(intro()));
        assert_eq!(countdown.tick(), Tick::Idle);
        assert!(!countdown.is_counting());
    }

    #[test]
    fn same_marker_keeps_counting() {
        let mut countdown = AutoSkipCountdown::new();
        countdown.observe(Some(&intro()), true);
        countdown.tick();

        assert_eq!(countdown.observe(Some(&intro()), true), Observation::Unchanged);
        assert_eq!(countdown.remaining(), Some(2));
    }

    #[test]
    fn auto_skip_off_never_counts() {
        let mut countdown = AutoSkipCountdown::new();
        assert_eq!(countdown.observe(Some(&intro()), false), Observation::Unchanged);
        assert_eq!(countdown.tick(), Tick::Idle);
    }

    #[test]
    fn cleared_marker_cancels() {
        let mut countdown = AutoSkipCountdown::new();
        countdown.observe(Some(&intro()), true);

        assert_eq!(countdown.observe(None, true), Observation::Cancelled);
        assert_eq!(countdown.remaining(), None);
    }

    #[test]
    fn disabling_auto_skip_cancels() {
        let mut countdown = AutoSkipCountdown::new();
        countdown.observe(Some(&intro()), true);

        assert_eq!(countdown.observe(Some(&intro()), false), Observation::Cancelled);
    }

    #[test]
    fn new_marker_restarts() {
        let credits =
            SkipMarker::new(SkipType::Credits, 1200.0, 1300.0, MarkerSource::Fingerprint).unwrap();
        let mut countdown = AutoSkipCountdown::new();
        countdown.observe(Some(&intro()), true);
        countdown.tick();

        assert_eq!(
            countdown.observe(Some(&credits), true),
            Observation::Restarted { remaining: 3 }
        );
        assert_eq!(countdown.tick(), Tick::Remaining(2));
    }
}
