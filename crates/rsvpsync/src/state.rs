//! Application state.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage is a trait object so the backend can be chosen
//! via feature flags; see `crate::store` for the mutual-exclusion checks.

use std::sync::Arc;

use anyhow::Context;
use rsvpsync_auth::{RefreshTokenIssuer, TokenCache};
use rsvpsync_core::events::EventSource;
use rsvpsync_core::merge::NameVisibility;
use rsvpsync_core::store::KvStore;
use rsvpsync_core::token::TokenIssuer;

use crate::config::Config;
use crate::ledger::Ledger;
use crate::upstream::EventFetcher;

/// Shared application state.
///
/// Cloned for each request handler. The only shared mutable data lives in
/// the key-value store behind `token_cache` and `ledger`.
#[derive(Clone)]
pub struct AppState {
    /// Cached Meetup access token.
    pub token_cache: TokenCache,
    /// Upstream events API.
    pub events: Arc<dyn EventSource>,
    /// Local attendee ledger.
    pub ledger: Arc<Ledger>,
    /// Meetup group url name, echoed by `/debug`.
    pub group: String,
    /// Whether `/events` includes attendee names.
    pub visibility: NameVisibility,
}

impl AppState {
    /// Wires the handlers' dependencies together.
    pub fn build(
        store: Arc<dyn KvStore>,
        issuer: Arc<dyn TokenIssuer>,
        events: Arc<dyn EventSource>,
        ledger: Ledger,
        group: impl Into<String>,
        visibility: NameVisibility,
    ) -> Self {
        Self {
            token_cache: TokenCache::new(store, issuer),
            events,
            ledger: Arc::new(ledger),
            group: group.into(),
            visibility,
        }
    }

    /// Builds the production state over an already opened store.
    pub fn with_store(store: Arc<dyn KvStore>, config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .build()
            .context("failed to build HTTP client")?;

        let issuer = Arc::new(RefreshTokenIssuer::new(
            config.oauth.clone(),
            http_client.clone(),
        ));

        let events = Arc::new(EventFetcher::new(
            http_client,
            config.events_api,
            config.events_endpoint()?,
            config.group_urlname.clone(),
            config.page_size,
        ));

        let ledger = Ledger::new(
            store.clone(),
            config.conditional_writes,
            config.ledger_max_attempts,
        );

        tracing::info!(
            group = %config.group_urlname,
            events_api = %config.events_api,
            ledger_mode = ?ledger.mode(),
            expose_local_names = config.expose_local_names,
            "Application state ready"
        );

        Ok(Self::build(
            store,
            issuer,
            events,
            ledger,
            config.group_urlname.clone(),
            NameVisibility::from_flag(config.expose_local_names),
        ))
    }
}

// ============================================================================
// Factory functions for the store backends
// ============================================================================

#[cfg(feature = "memory")]
mod memory_store {
    use super::*;
    use crate::store::MemoryStore;

    impl AppState {
        /// Creates AppState with the in-memory store.
        /// Tokens and RSVPs are lost on restart.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            tracing::warn!("Using the in-memory store; RSVPs will not survive a restart");
            Self::with_store(Arc::new(MemoryStore::new()), config)
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite_store {
    use super::*;
    use crate::store::SqliteStore;

    impl AppState {
        /// Creates AppState with the SQLite store.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            let store = SqliteStore::new(&config.sqlite_path)
                .await
                .with_context(|| format!("failed to open SQLite store at {}", config.sqlite_path))?;
            Self::with_store(Arc::new(store), config)
        }
    }
}

#[cfg(feature = "redis")]
mod redis_store {
    use super::*;
    use crate::store::RedisStore;

    impl AppState {
        /// Creates AppState with the Redis store.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            let store = RedisStore::new(&config.redis_url)
                .await
                .context("failed to connect to Redis")?;
            Self::with_store(Arc::new(store), config)
        }
    }
}
