//! Meetup refresh-token grant.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use rsvpsync_core::token::{Result, TokenError, TokenGrant, TokenIssuer};

use crate::config::OAuthConfig;

/// Longest slice of an error body kept in logs and errors.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Exchanges the configured refresh token for a fresh access token.
pub struct RefreshTokenIssuer {
    config: OAuthConfig,
    http_client: reqwest::Client,
}

impl RefreshTokenIssuer {
    pub fn new(config: OAuthConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl TokenIssuer for RefreshTokenIssuer {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn refresh(&self) -> Result<TokenGrant> {
        let response = self
            .http_client
            .post(self.config.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", self.config.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TokenError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            tracing::warn!(status = %status, body = %body, "Token refresh rejected");
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let grant = response
            .json::<TokenGrant>()
            .await
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        tracing::debug!(expires_in = grant.expires_in, "Token refreshed");
        Ok(grant)
    }
}
