//! Meetup OAuth for rsvpsync.
//!
//! This crate provides:
//! - The refresh-token grant against the Meetup token endpoint
//! - A store-backed access token cache with a 60 second skew buffer
//! - A counting mock issuer for tests (behind the `mock` feature)

mod cache;
mod config;
mod error;
mod providers;

pub use cache::TokenCache;
pub use config::{OAuthConfig, DEFAULT_TOKEN_URL};
pub use error::ConfigError;
#[cfg(any(test, feature = "mock"))]
pub use providers::MockIssuer;
pub use providers::RefreshTokenIssuer;
