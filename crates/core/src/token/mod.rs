//! Access token model and the pure rules of the token cache.

mod error;
mod functions;
mod traits;
mod types;

pub use error::TokenError;
pub use functions::{
    deserialize_token, is_token_usable, serialize_token, token_from_grant, SKEW_BUFFER_SECS,
};
pub use traits::{Result, TokenIssuer};
pub use types::{AccessToken, TokenGrant};
