//! Configuration loading tests

use skipper_core::{SkipperConfig, SkipperError};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_partial_file_with_defaults() {
    let file = write_config(
        r#"
[providers]
timeout_secs = 3

[scrobble]
client_id = "abc123"
"#,
    );

    let config = SkipperConfig::load_from(Some(file.path())).unwrap();

    assert_eq!(config.providers.timeout_secs, 3);
    assert_eq!(config.providers.intro_db_url, "https://api.introdb.app");
    assert_eq!(config.cache.ttl_hours, 24);
    assert_eq!(config.playback.sample_interval_ms, 500);
    assert_eq!(config.scrobble.client_id, "abc123");
    assert_eq!(config.scrobble.completion_threshold, 80.0);
}

#[test]
fn invalid_file_values_are_rejected() {
    let file = write_config(
        r#"
[cache]
ttl_hours = 0
"#,
    );

    let result = SkipperConfig::load_from(Some(file.path()));
    assert!(matches!(result, Err(SkipperError::Config(_))));
}

#[test]
fn oversized_durations_are_rejected() {
    let file = write_config(
        r#"
[cache]
ttl_hours = 3000000000000
"#,
    );
    let result = SkipperConfig::load_from(Some(file.path()));
    assert!(matches!(result, Err(SkipperError::Config(_))));

    let file = write_config(
        r#"
[scrobble]
refresh_leeway_secs = 9223372036854776
"#,
    );
    let result = SkipperConfig::load_from(Some(file.path()));
    assert!(matches!(result, Err(SkipperError::Config(_))));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(SkipperConfig::load_from(Some(&path)).is_err());
}
