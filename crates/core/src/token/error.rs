use thiserror::Error;

/// Errors produced while obtaining or decoding an access token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token request failed: {0}")]
    Request(String),
    #[error("Token endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
    #[error("Token lifetime of {0}s is too short to use")]
    TooShortLived(i64),
    #[error("Invalid token record: {0}")]
    InvalidRecord(String),
}
