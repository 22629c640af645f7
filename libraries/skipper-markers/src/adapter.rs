//! Provider response normalization
//!
//! Providers answer with `{ intro: {start, end}, outro: {start, end} }`, some
//! with extra flat fields (`s`, `e`) that are ignored. Missing or non-numeric
//! bounds suppress the corresponding marker instead of failing.

use serde_json::Value;
use skipper_core::{MarkerSource, SkipMarker, SkipType};
use tracing::debug;

/// Convert a raw provider response into zero, one, or two fingerprint markers
pub fn markers_from_response(response: &Value) -> Vec<SkipMarker> {
    [("intro", SkipType::Intro), ("outro", SkipType::Credits)]
        .into_iter()
        .filter_map(|(field, kind)| window_marker(response.get(field)?, kind))
        .collect()
}

fn window_marker(window: &Value, kind: SkipType) -> Option<SkipMarker> {
    let start = window.get("start").and_then(Value::as_f64)?;
    let end = window.get("end").and_then(Value::as_f64)?;

    match SkipMarker::new(kind, start, end, MarkerSource::Fingerprint) {
        Ok(marker) => Some(marker),
        Err(e) => {
            debug!(kind = %kind, start, end, error = %e, "Dropping unusable provider window");
            None
        }
    }
}
