//! Pure token cache rules.
//!
//! Time is always passed in as epoch seconds so callers decide which clock
//! to trust.

use super::{AccessToken, Result, TokenError, TokenGrant};

/// A token is never handed out within this many seconds of its expiry.
pub const SKEW_BUFFER_SECS: i64 = 60;

/// Returns true if `token` may still be used at `now`.
pub fn is_token_usable(token: &AccessToken, now: i64) -> bool {
    !token.value.is_empty() && token.expires_at > now.saturating_add(SKEW_BUFFER_SECS)
}

/// Builds the record to persist from a grant received at `now`.
///
/// Rejects grants that would already be unusable under the skew buffer.
pub fn token_from_grant(grant: TokenGrant, now: i64) -> Result<AccessToken> {
    if grant.access_token.trim().is_empty() {
        return Err(TokenError::InvalidResponse(
            "access_token is empty".to_string(),
        ));
    }

    let token = AccessToken::new(grant.access_token, now.saturating_add(grant.expires_in));

    if !is_token_usable(&token, now) {
        return Err(TokenError::TooShortLived(grant.expires_in));
    }

    Ok(token)
}

/// Serializes a token record to JSON bytes.
pub fn serialize_token(token: &AccessToken) -> Result<Vec<u8>> {
    serde_json::to_vec(token).map_err(|e| TokenError::InvalidRecord(e.to_string()))
}

/// Deserializes a token record from JSON bytes.
pub fn deserialize_token(bytes: &[u8]) -> Result<AccessToken> {
    serde_json::from_slice(bytes).map_err(|e| TokenError::InvalidRecord(e.to_string()))
}
