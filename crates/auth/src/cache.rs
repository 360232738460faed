//! Store-backed access token cache.

use std::sync::Arc;

use chrono::Utc;
use rsvpsync_core::error::ServiceError;
use rsvpsync_core::store::{KvStore, TOKEN_KEY};
use rsvpsync_core::token::{
    deserialize_token, is_token_usable, serialize_token, token_from_grant, AccessToken,
    TokenIssuer,
};

/// Hands out a usable access token, refreshing it only when stale.
///
/// The token record lives in the key-value store, not in process memory,
/// so every instance sharing the store shares the cache. Concurrent stale
/// readers may each refresh; the last write wins.
#[derive(Clone)]
pub struct TokenCache {
    store: Arc<dyn KvStore>,
    issuer: Arc<dyn TokenIssuer>,
}

impl TokenCache {
    pub fn new(store: Arc<dyn KvStore>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    /// Returns a token valid for at least another 60 seconds.
    pub async fn get_token(&self) -> Result<String, ServiceError> {
        self.get_token_at(Utc::now().timestamp()).await
    }

    /// [`TokenCache::get_token`] with an explicit clock, in epoch seconds.
    ///
    /// On failure the stored record is left untouched.
    pub async fn get_token_at(&self, now: i64) -> Result<String, ServiceError> {
        if let Some(token) = self.load().await? {
            if is_token_usable(&token, now) {
                tracing::debug!(expires_at = token.expires_at, "Using cached access token");
                return Ok(token.value);
            }
            tracing::debug!(expires_at = token.expires_at, "Cached access token is stale");
        }

        let grant = self.issuer.refresh().await.map_err(|e| {
            tracing::error!(error = %e, "Access token refresh failed");
            ServiceError::from(e)
        })?;

        let token = token_from_grant(grant, now).map_err(|e| {
            tracing::error!(error = %e, "Refusing unusable access token");
            ServiceError::from(e)
        })?;

        let bytes = serialize_token(&token).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.store.put(TOKEN_KEY, &bytes).await?;

        tracing::info!(expires_at = token.expires_at, "Access token refreshed");
        Ok(token.value)
    }

    /// Reads the stored record. Absent and undecodable records both yield None.
    async fn load(&self) -> Result<Option<AccessToken>, ServiceError> {
        let Some(bytes) = self.store.get(TOKEN_KEY).await? else {
            return Ok(None);
        };

        match deserialize_token(&bytes) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring undecodable token record");
                Ok(None)
            }
        }
    }
}
