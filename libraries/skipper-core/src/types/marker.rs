//! Skip marker types

use crate::error::{Result, SkipperError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a skippable segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipType {
    /// Opening titles
    Intro,
    /// End credits (providers report these as "outro")
    Credits,
    /// "Previously on" recap
    Recap,
    /// Next-episode preview
    Preview,
}

impl SkipType {
    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipType::Intro => "intro",
            SkipType::Credits => "credits",
            SkipType::Recap => "recap",
            SkipType::Preview => "preview",
        }
    }
}

impl fmt::Display for SkipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of a skip marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSource {
    /// Embedded chapter metadata
    Chapter,
    /// Any community provider
    Fingerprint,
    /// User-configured fallback
    Manual,
}

/// A time-boxed classification of a video segment.
///
/// The window is fixed at construction: fields are private and there are no
/// mutators. Times are seconds from the start of the video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSkipMarker")]
pub struct SkipMarker {
    #[serde(rename = "type")]
    kind: SkipType,
    start_time: f64,
    end_time: f64,
    source: MarkerSource,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSkipMarker {
    #[serde(rename = "type")]
    kind: SkipType,
    start_time: f64,
    end_time: f64,
    source: MarkerSource,
}

impl TryFrom<RawSkipMarker> for SkipMarker {
    type Error = SkipperError;

    fn try_from(raw: RawSkipMarker) -> Result<Self> {
        SkipMarker::new(raw.kind, raw.start_time, raw.end_time, raw.source)
    }
}

impl SkipMarker {
    /// Create a marker, validating `0 <= start_time < end_time`
    pub fn new(
        kind: SkipType,
        start_time: f64,
        end_time: f64,
        source: MarkerSource,
    ) -> Result<Self> {
        if !start_time.is_finite() || !end_time.is_finite() {
            return Err(SkipperError::invalid_marker(format!(
                "non-finite window {start_time}..{end_time}"
            )));
        }
        if start_time < 0.0 {
            return Err(SkipperError::invalid_marker(format!(
                "negative start {start_time}"
            )));
        }
        if start_time >= end_time {
            return Err(SkipperError::invalid_marker(format!(
                "start {start_time} >= end {end_time}"
            )));
        }

        Ok(Self {
            kind,
            start_time,
            end_time,
            source,
        })
    }

    /// Synthetic intro marker covering `0..seconds`
    pub fn manual_intro(seconds: f64) -> Result<Self> {
        Self::new(SkipType::Intro, 0.0, seconds, MarkerSource::Manual)
    }

    /// Synthetic credits marker covering `start..end`
    pub fn manual_credits(start_time: f64, end_time: f64) -> Result<Self> {
        Self::new(SkipType::Credits, start_time, end_time, MarkerSource::Manual)
    }

    /// Segment type
    pub fn kind(&self) -> SkipType {
        self.kind
    }

    /// Window start in seconds
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Window end in seconds (skip target)
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Marker provenance
    pub fn source(&self) -> MarkerSource {
        self.source
    }

    /// Window length in seconds
    pub fn length(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Half-open containment: `start_time <= position < end_time`
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start_time && position < self.end_time
    }
}

impl fmt::Display for SkipMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{:.1}s..{:.1}s]",
            self.kind, self.start_time, self.end_time
        )
    }
}
