//! Skip resolution
//!
//! Selects at most one active marker for a playback position. Evaluated from
//! scratch on every sample, so backward seeks and re-entry into a window need
//! no special handling.

use crate::types::ResolutionSnapshot;
use skipper_core::{SkipMarker, SkipType};

/// Credits markers activate this many seconds before their start
pub const CREDITS_LEAD_SECONDS: f64 = 10.0;

/// Manual credits stop being active this many seconds before the end
pub const CREDITS_TAIL_GUARD_SECONDS: f64 = 5.0;

/// Resolve the active marker for one tick.
///
/// Priority:
/// 1. nothing while `duration == 0` (video not loaded)
/// 2. first community marker whose window contains the position
/// 3. manual intro, then manual credits
pub fn resolve(snapshot: &ResolutionSnapshot<'_>) -> Option<SkipMarker> {
    let ResolutionSnapshot {
        position, duration, ..
    } = *snapshot;

    if !(duration > 0.0) || !position.is_finite() {
        return None;
    }

    if snapshot.toggles.community {
        if let Some(marker) = snapshot
            .community_markers
            .iter()
            .find(|marker| community_window_contains(marker, position))
        {
            return Some(marker.clone());
        }
    }

    if snapshot.toggles.manual {
        return resolve_manual(snapshot);
    }

    None
}

/// Activation window of a community marker
///
/// Credits get an early lead; every other type uses its half-open window.
pub fn community_window_contains(marker: &SkipMarker, position: f64) -> bool {
    match marker.kind() {
        SkipType::Credits => {
            position >= marker.start_time() - CREDITS_LEAD_SECONDS && position < marker.end_time()
        }
        SkipType::Intro | SkipType::Recap | SkipType::Preview => marker.contains(position),
    }
}

fn resolve_manual(snapshot: &ResolutionSnapshot<'_>) -> Option<SkipMarker> {
    let position = snapshot.position;
    let duration = snapshot.duration;

    let intro = snapshot.manual_intro_seconds;
    if intro > 0.0 && position < intro {
        return SkipMarker::manual_intro(intro).ok();
    }

    let credits = snapshot.manual_credits_seconds;
    if credits > 0.0 {
        let credits_start = (duration - credits).max(0.0);
        if position >= credits_start - CREDITS_LEAD_SECONDS
            && position < duration - CREDITS_TAIL_GUARD_SECONDS
        {
            return SkipMarker::manual_credits(credits_start, duration).ok();
        }
    }

    None
}
