//! Canonical upcoming-event records and the normalizers that produce them.
//!
//! Each upstream API variant gets exactly one [`EventNormalizer`]. The fetch
//! code never inspects payload shapes itself.

mod error;
mod graphql;
mod normalize;
mod rest;
mod traits;
mod types;

pub use error::EventsError;
pub use graphql::{upcoming_events_request, GraphqlNormalizer, UPCOMING_EVENTS_QUERY};
pub use normalize::{is_json_content_type, normalizer_for, EventNormalizer};
pub use rest::RestNormalizer;
pub use traits::{EventSource, Result};
pub use types::{EventRecord, EventsApi};
