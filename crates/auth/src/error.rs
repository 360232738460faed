use thiserror::Error;

/// Errors raised while loading the OAuth configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid token URL: {0}")]
    InvalidTokenUrl(#[from] url::ParseError),
}
