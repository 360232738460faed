//! Events API client.

mod fetcher;

pub use fetcher::{rest_events_url, EventFetcher, USER_AGENT_VALUE};
