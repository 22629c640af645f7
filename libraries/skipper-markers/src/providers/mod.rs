//! Community provider implementations

mod intro_db;
mod skip_button;

pub use intro_db::IntroDbProvider;
pub use skip_button::SkipButtonProvider;

use crate::error::{ProviderError, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Build the HTTP client shared by all providers
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(format!("Skipper/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ProviderError::Request)
}

/// Validate and normalize a provider base URL
pub(crate) fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim_end_matches('/');
    if url.is_empty() {
        return Err(ProviderError::InvalidUrl("URL cannot be empty".into()));
    }

    let parsed = Url::parse(url).map_err(|e| ProviderError::InvalidUrl(format!("{url}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ProviderError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    if parsed.host_str().is_none() {
        return Err(ProviderError::InvalidUrl(format!("{url}: missing host")));
    }

    Ok(url.to_string())
}

fn map_send_error(e: reqwest::Error, timeout: Duration) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(timeout)
    } else {
        ProviderError::Request(e)
    }
}

/// GET a JSON document, treating `404 Not Found` as "no data"
pub(crate) async fn get_json(
    request: reqwest::RequestBuilder,
    provider: &str,
    timeout: Duration,
) -> Result<Option<Value>> {
    let response = request
        .send()
        .await
        .map_err(|e| map_send_error(e, timeout))?;

    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        debug!(provider = %provider, "Provider has no data for episode");
        return Ok(None);
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let value = response
        .json::<Value>()
        .await
        .map_err(|e| ProviderError::Parse(format!("{provider}: {e}")))?;

    Ok(Some(value))
}

/// Probe a base URL; any non-5xx answer counts as reachable
pub(crate) async fn probe(http: &Client, url: &str, timeout: Duration) -> Result<bool> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| map_send_error(e, timeout))?;

    Ok(!response.status().is_server_error())
}
