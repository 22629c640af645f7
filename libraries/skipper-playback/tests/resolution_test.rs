//! Resolution priority and window boundary tests
//!
//! Every check builds an independent snapshot; resolution carries no state
//! between calls.

use proptest::prelude::*;
use skipper_core::{MarkerSource, SkipMarker, SkipType};
use skipper_playback::{resolve, ResolutionSnapshot, SourceToggles};

// ===== Helpers =====

fn community(kind: SkipType, start: f64, end: f64) -> SkipMarker {
    SkipMarker::new(kind, start, end, MarkerSource::Fingerprint).unwrap()
}

fn manual_only(position: f64, intro: f64, credits: f64) -> ResolutionSnapshot<'static> {
    ResolutionSnapshot {
        position,
        duration: 1200.0,
        community_markers: &[],
        manual_intro_seconds: intro,
        manual_credits_seconds: credits,
        toggles: SourceToggles {
            community: false,
            manual: true,
        },
    }
}

fn both_enabled(position: f64, markers: &[SkipMarker]) -> ResolutionSnapshot<'_> {
    ResolutionSnapshot {
        position,
        duration: 1200.0,
        community_markers: markers,
        manual_intro_seconds: 90.0,
        manual_credits_seconds: 60.0,
        toggles: SourceToggles {
            community: true,
            manual: true,
        },
    }
}

// ===== Manual fallback scenario =====

#[test]
fn test_manual_intro_active_from_zero() {
    let marker = resolve(&manual_only(0.0, 90.0, 0.0)).unwrap();

    assert_eq!(marker.kind(), SkipType::Intro);
    assert_eq!(marker.start_time(), 0.0);
    assert_eq!(marker.end_time(), 90.0);
    assert_eq!(marker.source(), MarkerSource::Manual);
}

#[test]
fn test_manual_intro_inactive_at_end() {
    assert!(resolve(&manual_only(90.0, 90.0, 0.0)).is_none());
}

#[test]
fn test_manual_credits_window() {
    let marker = resolve(&manual_only(1150.0, 90.0, 60.0)).unwrap();

    assert_eq!(marker.kind(), SkipType::Credits);
    assert_eq!(marker.start_time(), 1140.0);
    assert_eq!(marker.end_time(), 1200.0);
    assert_eq!(marker.source(), MarkerSource::Manual);
}

#[test]
fn test_manual_credits_tail_guard() {
    assert!(resolve(&manual_only(1194.9, 90.0, 60.0)).is_some());
    assert!(resolve(&manual_only(1195.0, 90.0, 60.0)).is_none());
    assert!(resolve(&manual_only(1196.0, 90.0, 60.0)).is_none());
}

#[test]
fn test_manual_credits_lead() {
    // creditsStart = 1140, lead begins at 1130
    assert!(resolve(&manual_only(1129.0, 90.0, 60.0)).is_none());
    assert!(resolve(&manual_only(1130.0, 90.0, 60.0)).is_some());
}

#[test]
fn test_manual_disabled_ignores_seconds() {
    let mut snapshot = manual_only(10.0, 90.0, 60.0);
    snapshot.toggles.manual = false;
    assert!(resolve(&snapshot).is_none());
}

#[test]
fn test_zero_seconds_disable_manual_markers() {
    assert!(resolve(&manual_only(0.0, 0.0, 0.0)).is_none());
    assert!(resolve(&manual_only(1150.0, 0.0, 0.0)).is_none());
}

// ===== Priority =====

#[test]
fn test_community_intro_beats_manual_intro() {
    let markers = [community(SkipType::Intro, 5.0, 70.0)];

    let marker = resolve(&both_enabled(20.0, &markers)).unwrap();
    assert_eq!(marker.source(), MarkerSource::Fingerprint);
    assert_eq!(marker.end_time(), 70.0);
}

#[test]
fn test_falls_through_to_manual_when_no_community_match() {
    let markers = [community(SkipType::Intro, 5.0, 70.0)];

    // Outside the community window but inside the manual intro
    let marker = resolve(&both_enabled(80.0, &markers)).unwrap();
    assert_eq!(marker.source(), MarkerSource::Manual);
    assert_eq!(marker.end_time(), 90.0);
}

#[test]
fn test_empty_community_list_uses_manual() {
    let marker = resolve(&both_enabled(30.0, &[])).unwrap();
    assert_eq!(marker.source(), MarkerSource::Manual);
}

#[test]
fn test_unloaded_video_beats_everything() {
    let markers = [community(SkipType::Intro, 0.0, 70.0)];
    let mut snapshot = both_enabled(10.0, &markers);
    snapshot.duration = 0.0;
    assert!(resolve(&snapshot).is_none());

    snapshot.duration = f64::NAN;
    assert!(resolve(&snapshot).is_none());
}

// ===== Community windows =====

#[test]
fn test_community_credits_lead_boundary() {
    let markers = [community(SkipType::Credits, 1100.0, 1180.0)];
    let mut snapshot = both_enabled(1090.0, &markers);
    snapshot.toggles.manual = false;

    assert!(resolve(&snapshot).is_some());

    snapshot.position = 1089.0;
    assert!(resolve(&snapshot).is_none());
}

#[test]
fn test_community_intro_half_open() {
    let markers = [community(SkipType::Intro, 40.0, 100.0)];
    let mut snapshot = both_enabled(99.99, &markers);
    snapshot.toggles.manual = false;

    assert!(resolve(&snapshot).is_some());

    snapshot.position = 100.0;
    assert!(resolve(&snapshot).is_none());
}

// ===== Property Tests =====

fn arbitrary_marker() -> impl Strategy<Value = SkipMarker> {
    (0u8..4, 0.0f64..1500.0, 1.0f64..200.0).prop_map(|(kind, start, length)| {
        let kind = match kind {
            0 => SkipType::Intro,
            1 => SkipType::Credits,
            2 => SkipType::Recap,
            _ => SkipType::Preview,
        };
        community(kind, start, start + length)
    })
}

proptest! {
    /// Property: an active community marker always comes from the input list
    #[test]
    fn active_community_marker_is_from_input(
        markers in prop::collection::vec(arbitrary_marker(), 0..8),
        position in 0.0f64..1800.0,
    ) {
        let snapshot = ResolutionSnapshot {
            position,
            duration: 1800.0,
            community_markers: &markers,
            manual_intro_seconds: 0.0,
            manual_credits_seconds: 0.0,
            toggles: SourceToggles { community: true, manual: false },
        };

        if let Some(active) = resolve(&snapshot) {
            prop_assert!(markers.contains(&active));
            prop_assert!(position < active.end_time());
        }
    }

    /// Property: an intro marker is active exactly on its half-open window
    #[test]
    fn intro_active_iff_inside_window(
        start in 0.0f64..1000.0,
        length in 1.0f64..200.0,
        position in 0.0f64..1400.0,
    ) {
        let markers = [community(SkipType::Intro, start, start + length)];
        let snapshot = ResolutionSnapshot {
            position,
            duration: 1400.0,
            community_markers: &markers,
            manual_intro_seconds: 0.0,
            manual_credits_seconds: 0.0,
            toggles: SourceToggles { community: true, manual: false },
        };

        let inside = position >= start && position < start + length;
        prop_assert_eq!(resolve(&snapshot).is_some(), inside);
    }

    /// Property: nothing is ever active while the duration is zero
    #[test]
    fn nothing_active_without_duration(
        markers in prop::collection::vec(arbitrary_marker(), 0..8),
        position in 0.0f64..1800.0,
        intro in 0.0f64..300.0,
        credits in 0.0f64..300.0,
    ) {
        let snapshot = ResolutionSnapshot {
            position,
            duration: 0.0,
            community_markers: &markers,
            manual_intro_seconds: intro,
            manual_credits_seconds: credits,
            toggles: SourceToggles { community: true, manual: true },
        };

        prop_assert!(resolve(&snapshot).is_none());
    }
}
