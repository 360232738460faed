//! Redis store backend.
//!
//! Shares one document store across every instance of the service.

mod error;
mod store;

pub use store::RedisStore;
