//! Events emitted by a playback session

use serde::{Deserialize, Serialize};
use skipper_core::SkipMarker;

/// Something the UI layer may need to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// A marker became active; show the skip affordance
    MarkerActivated {
        /// Now active
        marker: SkipMarker,
    },

    /// The active marker went away without a skip
    MarkerCleared {
        /// Previously active
        marker: SkipMarker,
    },

    /// Auto-skip countdown began
    CountdownStarted {
        /// Ticks left
        remaining: u32,
    },

    /// Auto-skip countdown advanced
    CountdownTick {
        /// Ticks left
        remaining: u32,
    },

    /// Auto-skip countdown was torn down without skipping
    CountdownCancelled,

    /// Playback jumped to the end of `marker`
    Skipped {
        /// The skipped marker
        marker: SkipMarker,
        /// True when the countdown triggered it
        auto: bool,
    },

    /// A position sample was taken
    PositionSampled {
        /// Seconds
        position: f64,
        /// Seconds
        duration: f64,
    },
}

impl SessionEvent {
    /// Per-tick samples are noisy; everything else is a state change
    pub fn is_state_change(&self) -> bool {
        !matches!(self, Self::PositionSampled { .. })
    }
}
