use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An upcoming event after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    /// Start instant in milliseconds since the Unix epoch, when upstream sends one.
    pub start_time: Option<i64>,
    /// Attendance reported by the upstream API.
    pub external_rsvp_count: u64,
}

/// Which upstream API variant to query for events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventsApi {
    #[default]
    Rest,
    Graphql,
}

impl FromStr for EventsApi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(EventsApi::Rest),
            "graphql" | "gql" => Ok(EventsApi::Graphql),
            other => Err(format!("unknown events API '{other}' (expected rest or graphql)")),
        }
    }
}

impl fmt::Display for EventsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventsApi::Rest => write!(f, "rest"),
            EventsApi::Graphql => write!(f, "graphql"),
        }
    }
}
