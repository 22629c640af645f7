//! Persisted settings shapes

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Global skip behaviour toggles and manual fallback durations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkipSettings {
    /// Use markers from community providers
    pub enabled_community_skip: bool,

    /// Use the manual fallback durations
    pub enabled_manual_skip: bool,

    /// Run the countdown and skip without user action
    pub auto_skip: bool,

    /// Global manual intro length in seconds (0 disables)
    pub intro_skip_seconds: f64,

    /// Global manual credits length in seconds (0 disables)
    pub credits_skip_seconds: f64,
}

impl Default for SkipSettings {
    fn default() -> Self {
        Self {
            enabled_community_skip: true,
            enabled_manual_skip: false,
            auto_skip: false,
            intro_skip_seconds: 0.0,
            credits_skip_seconds: 0.0,
        }
    }
}

/// Per-episode manual override, stored under `manual_skip_{episode key}`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManualSkipOverride {
    /// Intro length in seconds
    pub intro_skip_seconds: f64,
    /// Credits length in seconds
    pub credits_skip_seconds: f64,
}

/// OAuth credentials for the watch-history service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrobbleCredentials {
    /// Bearer token
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
    /// Access token expiry
    pub expires_at: DateTime<Utc>,
}

impl ScrobbleCredentials {
    /// True when the access token expires within `leeway` of `now` (or already has)
    pub fn expires_within(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        self.expires_at - now <= leeway
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = SkipSettings::default();
        assert!(settings.enabled_community_skip);
        assert!(!settings.enabled_manual_skip);
        assert!(!settings.auto_skip);
        assert_eq!(settings.intro_skip_seconds, 0.0);
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let settings: SkipSettings =
            serde_json::from_str(r#"{"enabledManualSkip":true,"introSkipSeconds":90}"#).unwrap();
        assert!(settings.enabled_community_skip);
        assert!(settings.enabled_manual_skip);
        assert_eq!(settings.intro_skip_seconds, 90.0);
        assert_eq!(settings.credits_skip_seconds, 0.0);
    }

    #[test]
    fn credentials_expiry_window() {
        let now = Utc::now();
        let creds = ScrobbleCredentials {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: now + Duration::seconds(59),
        };
        assert!(creds.expires_within(now, Duration::seconds(60)));
        assert!(!creds.expires_within(now - Duration::seconds(2), Duration::seconds(60)));
    }
}
