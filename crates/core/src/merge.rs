//! Combination of upstream events with the local ledger.
//!
//! This is part of the functional core: [`combine`] is pure and total.

use serde::Serialize;

use crate::events::EventRecord;
use crate::ledger::LedgerDocument;

/// Whether locally recorded attendee names are included in the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameVisibility {
    #[default]
    Hidden,
    Visible,
}

impl NameVisibility {
    pub fn from_flag(expose: bool) -> Self {
        if expose {
            NameVisibility::Visible
        } else {
            NameVisibility::Hidden
        }
    }
}

/// One event as returned to the browser client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedView {
    pub id: String,
    #[serde(rename = "name")]
    pub title: String,
    #[serde(rename = "time", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(rename = "meetup_rsvps")]
    pub external_rsvp_count: u64,
    #[serde(rename = "local_rsvps")]
    pub local_rsvp_count: u64,
    #[serde(rename = "total_rsvps")]
    pub total_rsvp_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_names: Option<Vec<String>>,
}

/// Joins each event with its ledger entry.
///
/// Events without an entry get a local count of zero. Output order follows
/// `events`. Ledger entries for events not in `events` are ignored.
///
/// # Examples
///
/// ```
/// use rsvpsync_core::events::EventRecord;
/// use rsvpsync_core::ledger::LedgerDocument;
/// use rsvpsync_core::merge::{combine, NameVisibility};
///
/// let events = vec![EventRecord {
///     id: "1".to_string(),
///     title: "Meetup".to_string(),
///     start_time: Some(1_700_000_000_000),
///     external_rsvp_count: 5,
/// }];
///
/// let views = combine(&events, &LedgerDocument::new(), NameVisibility::Hidden);
/// assert_eq!(views[0].total_rsvp_count, 5);
/// ```
pub fn combine(
    events: &[EventRecord],
    ledger: &LedgerDocument,
    visibility: NameVisibility,
) -> Vec<CombinedView> {
    events
        .iter()
        .map(|event| {
            let names = ledger.names(&event.id);
            let local = names.len() as u64;

            CombinedView {
                id: event.id.clone(),
                title: event.title.clone(),
                start_time: event.start_time,
                external_rsvp_count: event.external_rsvp_count,
                local_rsvp_count: local,
                total_rsvp_count: event.external_rsvp_count.saturating_add(local),
                local_names: match visibility {
                    NameVisibility::Visible => Some(names.to_vec()),
                    NameVisibility::Hidden => None,
                },
            }
        })
        .collect()
}
