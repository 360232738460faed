//! Normalizer for the REST `/{group}/events` list endpoint.

use serde::Deserialize;

use super::normalize::{decode_each, expect_array, parse_json};
use super::{EventNormalizer, EventRecord, EventsError};
use crate::serde::deserialize_id;

/// One element of the REST events array. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RestEvent {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    #[serde(alias = "title")]
    name: String,
    /// Milliseconds since the epoch.
    #[serde(default)]
    time: Option<i64>,
    yes_rsvp_count: u64,
}

impl From<RestEvent> for EventRecord {
    fn from(event: RestEvent) -> Self {
        EventRecord {
            id: event.id,
            title: event.name,
            start_time: event.time,
            external_rsvp_count: event.yes_rsvp_count,
        }
    }
}

/// Normalizes a REST events array.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestNormalizer;

impl EventNormalizer for RestNormalizer {
    fn normalize(&self, body: &[u8]) -> Result<Vec<EventRecord>, EventsError> {
        let items = expect_array(parse_json(body)?)?;
        decode_each(items, |event: RestEvent| Ok(event.into()))
    }
}
