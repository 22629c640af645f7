//! Core types for skip resolution

use serde::{Deserialize, Serialize};
use skipper_core::{EpisodeKey, ManualSkipOverride, SkipMarker, SkipSettings};

/// Which marker sources may produce an active marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceToggles {
    /// Community provider markers
    pub community: bool,
    /// Manual fallback durations
    pub manual: bool,
}

impl From<&SkipSettings> for SourceToggles {
    fn from(settings: &SkipSettings) -> Self {
        Self {
            community: settings.enabled_community_skip,
            manual: settings.enabled_manual_skip,
        }
    }
}

/// Inputs for one resolution tick
///
/// Recomputed on every position sample and never stored.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionSnapshot<'a> {
    /// Current position in seconds
    pub position: f64,

    /// Media duration in seconds (0 while loading)
    pub duration: f64,

    /// Aggregated community markers, in merge order
    pub community_markers: &'a [SkipMarker],

    /// Manual intro length in seconds (0 disables)
    pub manual_intro_seconds: f64,

    /// Manual credits length in seconds (0 disables)
    pub manual_credits_seconds: f64,

    /// Enabled sources
    pub toggles: SourceToggles,
}

/// Per-episode inputs loaded once when an episode starts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeInputs {
    /// Episode identity, if known
    pub key: Option<EpisodeKey>,

    /// Aggregated community markers
    pub community_markers: Vec<SkipMarker>,

    /// Per-episode manual override; global settings apply when absent
    pub manual_override: Option<ManualSkipOverride>,
}

impl EpisodeInputs {
    /// Manual `(intro, credits)` seconds for this episode under `settings`
    pub fn manual_seconds(&self, settings: &SkipSettings) -> (f64, f64) {
        match self.manual_override {
            Some(manual) => (manual.intro_skip_seconds, manual.credits_skip_seconds),
            None => (settings.intro_skip_seconds, settings.credits_skip_seconds),
        }
    }
}

/// Settings and inputs ready to load into a session
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedEpisode {
    /// Skip settings at load time
    pub settings: SkipSettings,
    /// Episode inputs
    pub inputs: EpisodeInputs,
    /// Saved resume position, if any
    pub resume_position: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_takes_precedence() {
        let settings = SkipSettings {
            intro_skip_seconds: 90.0,
            credits_skip_seconds: 60.0,
            ..SkipSettings::default()
        };

        let global = EpisodeInputs::default();
        assert_eq!(global.manual_seconds(&settings), (90.0, 60.0));

        let overridden = EpisodeInputs {
            manual_override: Some(ManualSkipOverride {
                intro_skip_seconds: 45.0,
                credits_skip_seconds: 0.0,
            }),
            ..EpisodeInputs::default()
        };
        assert_eq!(overridden.manual_seconds(&settings), (45.0, 0.0));
    }

    #[test]
    fn toggles_from_settings() {
        let settings = SkipSettings {
            enabled_community_skip: false,
            enabled_manual_skip: true,
            ..SkipSettings::default()
        };
        let toggles = SourceToggles::from(&settings);
        assert!(!toggles.community);
        assert!(toggles.manual);
    }
}
