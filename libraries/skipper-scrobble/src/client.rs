//! Watch-history HTTP client.

use crate::api::ScrobbleApi;
use crate::error::{Result, ScrobbleError};
use crate::types::{RefreshTokenRequest, ScrobbleAction, ScrobblePayload, TokenResponse};
use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use reqwest::Client;
use skipper_core::config::ScrobbleSettings;
use skipper_core::{Clock, ScrobbleCredentials, SettingsStore, SettingsStoreExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const API_VERSION: &str = "2";
const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the watch-history service.
///
/// Holds the OAuth credentials and refreshes them transparently before a
/// scrobble when the access token is about to expire. Refreshed credentials
/// are written back to the attached [`SettingsStore`].
///
/// # Example
///
/// ```ignore
/// let client = WatchHistoryClient::from_store(&config.scrobble, store, clock).await?;
/// let accepted = client.scrobble(ScrobbleAction::Start, &payload).await;
/// ```
pub struct WatchHistoryClient {
    http: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    credentials: RwLock<Option<ScrobbleCredentials>>,
    store: Option<Arc<dyn SettingsStore>>,
    clock: Arc<dyn Clock>,
    refresh_leeway: ChronoDuration,
}

impl WatchHistoryClient {
    /// Create a signed-out client
    pub fn new(settings: &ScrobbleSettings, clock: Arc<dyn Clock>) -> Result<Self> {
        let base_url = settings.api_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ScrobbleError::InvalidUrl("URL cannot be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ScrobbleError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("Skipper/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            credentials: RwLock::new(None),
            store: None,
            clock,
            refresh_leeway: settings.refresh_leeway(),
        })
    }

    /// Create a client with the credentials saved in `store`.
    ///
    /// The store is kept so refreshed tokens are persisted.
    pub async fn from_store(
        settings: &ScrobbleSettings,
        store: Arc<dyn SettingsStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let credentials = store.load_credentials().await?;
        debug!(signed_in = credentials.is_some(), "Loaded scrobble credentials");

        let client = Self::new(settings, clock)?.with_store(store);
        *client.credentials.write().await = credentials;
        Ok(client)
    }

    /// Persist refreshed credentials to `store`
    pub fn with_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Start with the given credentials
    pub fn with_credentials(self, credentials: ScrobbleCredentials) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
            ..self
        }
    }

    /// Service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current credentials
    pub async fn credentials(&self) -> Option<ScrobbleCredentials> {
        self.credentials.read().await.clone()
    }

    /// Replace the credentials (e.g. after a device-code sign-in)
    pub async fn set_credentials(&self, credentials: ScrobbleCredentials) -> Result<()> {
        if let Some(store) = &self.store {
            store.save_credentials(&credentials).await?;
        }
        *self.credentials.write().await = Some(credentials);
        info!("Signed in to watch-history service");
        Ok(())
    }

    /// Forget the credentials
    pub async fn sign_out(&self) -> Result<()> {
        *self.credentials.write().await = None;
        if let Some(store) = &self.store {
            store.clear_credentials().await?;
        }
        info!("Signed out of watch-history service");
        Ok(())
    }

    /// Exchange the refresh token for new credentials.
    pub async fn refresh(&self) -> Result<ScrobbleCredentials> {
        let refresh_token = self
            .credentials
            .read()
            .await
            .as_ref()
            .map(|c| c.refresh_token.clone())
            .ok_or(ScrobbleError::AuthRequired)?;

        let url = format!("{}/oauth/token", self.base_url);
        debug!(url = %url, "Refreshing access token");

        let request = RefreshTokenRequest {
            refresh_token: &refresh_token,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            redirect_uri: OOB_REDIRECT_URI,
            grant_type: "refresh_token",
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScrobbleError::TokenRefreshFailed(format!(
                "{}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ScrobbleError::Parse(format!("Failed to parse token response: {}", e))
        })?;

        let expires_at = ChronoDuration::try_seconds(token.expires_in)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                ScrobbleError::Parse(format!(
                    "Token lifetime out of range: {}",
                    token.expires_in
                ))
            })?;

        let credentials = ScrobbleCredentials {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
        };

        *self.credentials.write().await = Some(credentials.clone());

        if let Some(store) = &self.store {
            if let Err(e) = store.save_credentials(&credentials).await {
                warn!(error = %e, "Failed to persist refreshed credentials");
            }
        }

        info!(expires_at = %credentials.expires_at, "Access token refreshed");
        Ok(credentials)
    }

    /// Access token to use now, refreshing first when it is about to expire.
    ///
    /// A failed refresh falls back to the current token.
    async fn access_token(&self) -> Option<String> {
        let current = self.credentials.read().await.clone()?;

        if !current.expires_within(self.clock.now(), self.refresh_leeway) {
            return Some(current.access_token);
        }

        match self.refresh().await {
            Ok(refreshed) => Some(refreshed.access_token),
            Err(e) => {
                warn!(error = %e, "Token refresh failed, using current token");
                Some(current.access_token)
            }
        }
    }

    async fn post_scrobble(
        &self,
        action: ScrobbleAction,
        payload: &ScrobblePayload,
        token: &str,
    ) -> Result<()> {
        let url = format!("{}/scrobble/{}", self.base_url, action);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header("trakt-api-version", API_VERSION)
            .header("trakt-api-key", &self.client_id)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ScrobbleError::Status {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl ScrobbleApi for WatchHistoryClient {
    async fn is_authenticated(&self) -> bool {
        self.credentials.read().await.is_some()
    }

    async fn scrobble(&self, action: ScrobbleAction, payload: &ScrobblePayload) -> bool {
        let Some(token) = self.access_token().await else {
            debug!(action = %action, "Not signed in, skipping scrobble");
            return false;
        };

        match self.post_scrobble(action, payload, &token).await {
            Ok(()) => {
                info!(action = %action, progress = payload.progress(), "Scrobbled");
                true
            }
            Err(e) => {
                warn!(action = %action, error = %e, "Scrobble failed");
                false
            }
        }
    }
}
