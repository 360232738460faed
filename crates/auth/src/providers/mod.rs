//! Token issuers.
//!
//! This module contains implementations of `TokenIssuer` for:
//! - Meetup's OAuth refresh-token grant
//! - A counting mock for tests

mod meetup;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use meetup::RefreshTokenIssuer;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockIssuer;
