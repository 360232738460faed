//! The locally-owned RSVP ledger.
//!
//! The ledger is a single document mapping event ids to the attendee names
//! recorded by this service. Everything here is pure; reading and writing
//! the document happens in the `rsvpsync` crate.

mod error;
mod operations;
mod types;

pub use error::LedgerError;
pub use operations::{parse_ledger, serialize_ledger, validate_rsvp};
pub use types::{AppendOutcome, LedgerDocument, Rsvp};
