//! Fetches upcoming events from Meetup and hands the body to a normalizer.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use url::Url;

use rsvpsync_core::events::{
    is_json_content_type, normalizer_for, upcoming_events_request, EventRecord, EventSource,
    EventsApi, EventsError, Result,
};

/// Sent with every events request.
pub const USER_AGENT_VALUE: &str = "Mozilla/5.0 (MeetupRSVP/1.0)";

/// How much of each response body is logged.
const BODY_PREVIEW_CHARS: usize = 300;

/// Builds `{api_url}/{group}/events`, percent-encoding the group name.
///
/// Returns None if `api_url` cannot carry path segments.
pub fn rest_events_url(api_url: &Url, group: &str) -> Option<Url> {
    let mut url = api_url.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(group)
        .push("events");
    Some(url)
}

/// Calls one events API variant and normalizes the response.
pub struct EventFetcher {
    http_client: reqwest::Client,
    api: EventsApi,
    endpoint: Url,
    group: String,
    page_size: u32,
}

impl EventFetcher {
    /// `endpoint` is the full events URL for REST, or the GraphQL endpoint.
    pub fn new(
        http_client: reqwest::Client,
        api: EventsApi,
        endpoint: Url,
        group: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            http_client,
            api,
            endpoint,
            group: group.into(),
            page_size,
        }
    }

    fn request(&self) -> reqwest::RequestBuilder {
        match self.api {
            EventsApi::Rest => self.http_client.get(self.endpoint.clone()),
            EventsApi::Graphql => self
                .http_client
                .post(self.endpoint.clone())
                .json(&upcoming_events_request(&self.group, self.page_size)),
        }
    }
}

#[async_trait]
impl EventSource for EventFetcher {
    async fn fetch_events(&self, token: &str) -> Result<Vec<EventRecord>> {
        let response = self
            .request()
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, api = %self.api, "Events request failed");
                EventsError::Request(e.to_string())
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response
            .bytes()
            .await
            .map_err(|e| EventsError::Request(e.to_string()))?;

        let preview: String = String::from_utf8_lossy(&body)
            .chars()
            .take(BODY_PREVIEW_CHARS)
            .collect();
        tracing::debug!(status = %status, api = %self.api, body = %preview, "Events API response");

        if !status.is_success() {
            return Err(EventsError::Status {
                status: status.as_u16(),
            });
        }

        if !is_json_content_type(content_type.as_deref()) {
            return Err(EventsError::UnexpectedContentType(
                content_type.unwrap_or_else(|| "none".to_string()),
            ));
        }

        let events = normalizer_for(self.api).normalize(&body)?;
        tracing::debug!(count = events.len(), "Normalized upcoming events");
        Ok(events)
    }
}
