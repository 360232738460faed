use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{EventRecord, EventsApi, EventsError, GraphqlNormalizer, RestNormalizer};

/// Turns one upstream variant's raw response body into canonical records.
pub trait EventNormalizer: Send + Sync {
    fn normalize(&self, body: &[u8]) -> Result<Vec<EventRecord>, EventsError>;
}

/// Returns the normalizer for an API variant.
pub fn normalizer_for(api: EventsApi) -> &'static dyn EventNormalizer {
    match api {
        EventsApi::Rest => &RestNormalizer,
        EventsApi::Graphql => &GraphqlNormalizer,
    }
}

/// Returns true if a `Content-Type` header value denotes JSON.
///
/// Accepts `application/json` and any `+json` structured syntax suffix,
/// ignoring parameters such as `charset`.
pub fn is_json_content_type(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Parses a body as JSON.
pub(crate) fn parse_json(body: &[u8]) -> Result<Value, EventsError> {
    serde_json::from_slice(body).map_err(|e| EventsError::InvalidJson(e.to_string()))
}

/// Requires a JSON array, naming what was found otherwise.
pub(crate) fn expect_array(value: Value) -> Result<Vec<Value>, EventsError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(EventsError::NotAList(json_kind(&other))),
    }
}

/// Decodes every element as `T` and converts it. Stops at the first failure.
pub(crate) fn decode_each<T, F>(items: Vec<Value>, convert: F) -> Result<Vec<EventRecord>, EventsError>
where
    T: DeserializeOwned,
    F: Fn(T) -> Result<EventRecord, String>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<T>(item)
                .map_err(|e| e.to_string())
                .and_then(&convert)
                .map_err(|reason| EventsError::MalformedEvent { index, reason })
        })
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
