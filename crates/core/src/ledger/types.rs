use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A validated RSVP: a non-blank event id and a trimmed, non-blank name.
///
/// Only [`validate_rsvp`](super::validate_rsvp) constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rsvp {
    pub(crate) event_id: String,
    pub(crate) name: String,
}

impl Rsvp {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of appending a name to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The name was new for this event and has been appended.
    Added,
    /// The name was already recorded; the document is unchanged.
    AlreadyPresent,
}

impl AppendOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AppendOutcome::Added)
    }
}

/// The whole ledger: event id to attendee names in insertion order.
///
/// Serialized as a plain JSON object, `{"<event_id>": ["name", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerDocument(BTreeMap<String, Vec<String>>);

impl LedgerDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names recorded for `event_id`, empty if the event has no entry.
    pub fn names(&self, event_id: &str) -> &[String] {
        self.0.get(event_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Appends the RSVP's name unless the event already lists it.
    pub fn append(&mut self, rsvp: &Rsvp) -> AppendOutcome {
        let names = self.0.entry(rsvp.event_id.clone()).or_default();

        if names.iter().any(|existing| existing == &rsvp.name) {
            return AppendOutcome::AlreadyPresent;
        }

        names.push(rsvp.name.clone());
        AppendOutcome::Added
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(id, names)| (id.as_str(), names.as_slice()))
    }

    /// Number of events with at least one entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }
}
