use async_trait::async_trait;

use super::{EventRecord, EventsError};

/// Result type for event operations.
pub type Result<T> = std::result::Result<T, EventsError>;

/// Source of upcoming events, authenticated with a bearer token.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetches and normalizes the upcoming events.
    ///
    /// Either every event is returned or the call fails; there are no
    /// partial results.
    async fn fetch_events(&self, token: &str) -> Result<Vec<EventRecord>>;
}
