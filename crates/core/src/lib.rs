//! Functional core for rsvpsync.
//!
//! Everything in this crate is either a pure function over plain data or a
//! trait describing an I/O seam. Implementations of the traits live in the
//! `rsvpsync_auth` and `rsvpsync` crates.

pub mod error;
pub mod events;
pub mod ledger;
pub mod merge;
pub mod serde;
pub mod store;
pub mod token;
