//! Watch-history service capability

use crate::types::{ScrobbleAction, ScrobblePayload};
use async_trait::async_trait;
use std::sync::Arc;

/// A watch-history service that accepts scrobbles.
///
/// Every failure is contained: implementations log and return `false`.
#[async_trait]
pub trait ScrobbleApi: Send + Sync {
    /// Whether an access token is present
    async fn is_authenticated(&self) -> bool;

    /// Report one playback state change; `true` when the service accepted it
    async fn scrobble(&self, action: ScrobbleAction, payload: &ScrobblePayload) -> bool;
}

#[async_trait]
impl<T: ScrobbleApi + ?Sized> ScrobbleApi for Arc<T> {
    async fn is_authenticated(&self) -> bool {
        (**self).is_authenticated().await
    }

    async fn scrobble(&self, action: ScrobbleAction, payload: &ScrobblePayload) -> bool {
        (**self).scrobble(action, payload).await
    }
}
