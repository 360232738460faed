use async_trait::async_trait;

use super::{TokenError, TokenGrant};

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Abstraction over the upstream OAuth token endpoint.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Performs one refresh-token grant.
    async fn refresh(&self) -> Result<TokenGrant>;
}
