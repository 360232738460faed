//! Mock token issuer for development and testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rsvpsync_core::token::{Result, TokenError, TokenGrant, TokenIssuer};

/// Issuer that answers without any network call and counts refreshes.
///
/// Successful grants carry the token `"{prefix}-{n}"`, where `n` is the
/// 1-based call number, so tests can tell refreshes apart.
pub struct MockIssuer {
    prefix: String,
    expires_in: i64,
    failure: Option<TokenError>,
    calls: AtomicUsize,
}

impl MockIssuer {
    /// Create an issuer whose grants live for `expires_in` seconds.
    pub fn new(prefix: impl Into<String>, expires_in: i64) -> Self {
        Self {
            prefix: prefix.into(),
            expires_in,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create an issuer that fails every refresh with `error`.
    pub fn failing(error: TokenError) -> Self {
        Self {
            prefix: String::new(),
            expires_in: 0,
            failure: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of refreshes attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIssuer for MockIssuer {
    async fn refresh(&self) -> Result<TokenGrant> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        Ok(TokenGrant {
            access_token: format!("{}-{}", self.prefix, call),
            expires_in: self.expires_in,
            token_type: Some("bearer".to_string()),
            refresh_token: None,
        })
    }
}
