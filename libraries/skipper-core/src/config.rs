/// Skipper configuration
use crate::error::{Result, SkipperError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "skipper.toml";

/// Largest cache lifetime a `chrono::Duration` can hold
pub const MAX_CACHE_TTL_HOURS: u64 = (i64::MAX / 3_600_000) as u64;

/// Largest refresh leeway a `chrono::Duration` can hold
pub const MAX_REFRESH_LEEWAY_SECS: u64 = (i64::MAX / 1000) as u64;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SkipperConfig {
    /// Community marker providers
    #[serde(default)]
    pub providers: ProviderSettings,

    /// Aggregated marker cache
    #[serde(default)]
    pub cache: CacheSettings,

    /// Playback sampling cadence
    #[serde(default)]
    pub playback: PlaybackSettings,

    /// Watch-history service
    #[serde(default)]
    pub scrobble: ScrobbleSettings,
}

/// Community provider endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Intro-detection service base URL (highest precedence)
    #[serde(default = "default_intro_db_url")]
    pub intro_db_url: String,

    /// Community skip-button service base URL
    #[serde(default = "default_skip_button_url")]
    pub skip_button_url: String,

    /// Per-provider request timeout
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,
}

/// Aggregated marker cache
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Entry lifetime in hours
    #[serde(default = "default_cache_ttl_hours")]
    pub ttl_hours: u64,
}

/// Playback sampling cadence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Position sampling interval
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,

    /// Auto-skip countdown step
    #[serde(default = "default_countdown_interval_ms")]
    pub countdown_interval_ms: u64,
}

/// Watch-history service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrobbleSettings {
    /// API base URL
    #[serde(default = "default_scrobble_api_url")]
    pub api_url: String,

    /// OAuth client id (also sent as the API key header)
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: String,

    /// Refresh the token when it expires within this many seconds
    #[serde(default = "default_refresh_leeway_secs")]
    pub refresh_leeway_secs: u64,

    /// Progress percentage reported as completion
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: f64,
}

fn default_intro_db_url() -> String {
    "https://api.introdb.app".to_string()
}

fn default_skip_button_url() -> String {
    "https://api.skipbutton.net".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    5
}

fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_sample_interval_ms() -> u64 {
    500
}

fn default_countdown_interval_ms() -> u64 {
    1000
}

fn default_scrobble_api_url() -> String {
    "https://api.trakt.tv".to_string()
}

fn default_refresh_leeway_secs() -> u64 {
    60
}

fn default_completion_threshold() -> f64 {
    80.0
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            intro_db_url: default_intro_db_url(),
            skip_button_url: default_skip_button_url(),
            timeout_secs: default_provider_timeout_secs(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_hours: default_cache_ttl_hours(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            sample_interval_ms: default_sample_interval_ms(),
            countdown_interval_ms: default_countdown_interval_ms(),
        }
    }
}

impl Default for ScrobbleSettings {
    fn default() -> Self {
        Self {
            api_url: default_scrobble_api_url(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_leeway_secs: default_refresh_leeway_secs(),
            completion_threshold: default_completion_threshold(),
        }
    }
}

impl ProviderSettings {
    /// Per-provider timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheSettings {
    /// Entry lifetime as a `chrono::Duration`, capped at [`MAX_CACHE_TTL_HOURS`]
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours.min(MAX_CACHE_TTL_HOURS) as i64)
    }
}

impl PlaybackSettings {
    /// Sampling interval as a `Duration`
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    /// Countdown step as a `Duration`
    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_ms)
    }
}

impl ScrobbleSettings {
    /// Refresh leeway as a `chrono::Duration`, capped at [`MAX_REFRESH_LEEWAY_SECS`]
    pub fn refresh_leeway(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.refresh_leeway_secs.min(MAX_REFRESH_LEEWAY_SECS) as i64)
    }
}

impl SkipperConfig {
    /// Load configuration from `skipper.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        Self::load_from(path.exists().then_some(path.as_path()))
    }

    /// Load configuration from an optional file, then environment
    ///
    /// Environment variables use the `SKIPPER_` prefix and `__` between
    /// sections, e.g. `SKIPPER_PROVIDERS__TIMEOUT_SECS=3`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SKIPPER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| SkipperError::config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SkipperError::config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_url("providers.intro_db_url", &self.providers.intro_db_url)?;
        validate_url("providers.skip_button_url", &self.providers.skip_button_url)?;
        validate_url("scrobble.api_url", &self.scrobble.api_url)?;

        if self.providers.timeout_secs == 0 {
            return Err(SkipperError::config(
                "providers.timeout_secs must be greater than 0",
            ));
        }
        if self.cache.ttl_hours == 0 {
            return Err(SkipperError::config("cache.ttl_hours must be greater than 0"));
        }
        if self.cache.ttl_hours > MAX_CACHE_TTL_HOURS {
            return Err(SkipperError::config(format!(
                "cache.ttl_hours must be at most {MAX_CACHE_TTL_HOURS}"
            )));
        }
        if self.scrobble.refresh_leeway_secs > MAX_REFRESH_LEEWAY_SECS {
            return Err(SkipperError::config(format!(
                "scrobble.refresh_leeway_secs must be at most {MAX_REFRESH_LEEWAY_SECS}"
            )));
        }
        if self.playback.sample_interval_ms == 0 || self.playback.countdown_interval_ms == 0 {
            return Err(SkipperError::config(
                "playback intervals must be greater than 0",
            ));
        }

        let threshold = self.scrobble.completion_threshold;
        if !(threshold > 0.0 && threshold <= 100.0) {
            return Err(SkipperError::config(format!(
                "scrobble.completion_threshold must be in (0, 100], got {threshold}"
            )));
        }

        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(SkipperError::config(format!("{field} cannot be empty")));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(SkipperError::config(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SkipperConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.providers.timeout(), Duration::from_secs(5));
        assert_eq!(config.cache.ttl(), chrono::Duration::hours(24));
        assert_eq!(config.playback.sample_interval(), Duration::from_millis(500));
        assert_eq!(config.scrobble.refresh_leeway(), chrono::Duration::seconds(60));
    }

    #[test]
    fn rejects_unrepresentable_durations() {
        let mut config = SkipperConfig::default();
        config.cache.ttl_hours = u64::MAX;
        assert!(matches!(config.validate(), Err(SkipperError::Config(_))));
        assert!(config.cache.ttl() > chrono::Duration::zero());

        config.cache.ttl_hours = MAX_CACHE_TTL_HOURS;
        assert!(config.validate().is_ok());

        config.scrobble.refresh_leeway_secs = MAX_REFRESH_LEEWAY_SECS + 1;
        assert!(matches!(config.validate(), Err(SkipperError::Config(_))));
        assert_eq!(
            config.scrobble.refresh_leeway(),
            chrono::Duration::seconds(MAX_REFRESH_LEEWAY_SECS as i64)
        );
    }

    #[test]
    fn rejects_bad_url() {
        let mut config = SkipperConfig::default();
        config.providers.skip_button_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(SkipperError::Config(_))));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut config = SkipperConfig::default();
        config.scrobble.completion_threshold = 120.0;
        assert!(config.validate().is_err());

        config.scrobble.completion_threshold = 0.0;
        assert!(config.validate().is_err());
    }
}
