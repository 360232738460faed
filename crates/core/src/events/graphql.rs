//! Normalizer and request body for the GraphQL `groupByUrlname` query.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::{json, Value};

use super::normalize::{decode_each, expect_array, json_kind, parse_json};
use super::{EventNormalizer, EventRecord, EventsError};
use crate::serde::deserialize_id;

/// Query for the upcoming events of one group.
pub const UPCOMING_EVENTS_QUERY: &str = "\
query UpcomingEvents($urlname: String!, $first: Int!) {
  groupByUrlname(urlname: $urlname) {
    upcomingEvents(input: { first: $first }) {
      edges { node { id title dateTime going } }
    }
  }
}";

/// Builds the POST body for [`UPCOMING_EVENTS_QUERY`].
pub fn upcoming_events_request(urlname: &str, first: u32) -> Value {
    json!({
        "query": UPCOMING_EVENTS_QUERY,
        "variables": {
            "urlname": urlname,
            "first": first,
        },
    })
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: Node,
}

#[derive(Debug, Deserialize)]
struct Node {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    title: String,
    #[serde(rename = "dateTime", default)]
    date_time: Option<String>,
    going: Going,
}

/// Attendance is either a bare count or a connection with `totalCount`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Going {
    Count(u64),
    Connection {
        #[serde(rename = "totalCount")]
        total_count: u64,
    },
}

impl Going {
    fn count(&self) -> u64 {
        match self {
            Going::Count(n) => *n,
            Going::Connection { total_count } => *total_count,
        }
    }
}

/// Converts an RFC 3339 timestamp to epoch milliseconds.
///
/// Also accepts the minute-precision form `2024-05-01T18:30-04:00`.
fn parse_date_time(value: &str) -> Result<i64, String> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z"))
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| format!("invalid dateTime '{value}': {e}"))
}

fn edge_to_record(edge: Edge) -> Result<EventRecord, String> {
    let node = edge.node;
    Ok(EventRecord {
        start_time: node
            .date_time
            .as_deref()
            .map(parse_date_time)
            .transpose()?,
        external_rsvp_count: node.going.count(),
        id: node.id,
        title: node.title,
    })
}

/// Normalizes a GraphQL `groupByUrlname.upcomingEvents` response.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphqlNormalizer;

impl EventNormalizer for GraphqlNormalizer {
    fn normalize(&self, body: &[u8]) -> Result<Vec<EventRecord>, EventsError> {
        let value = parse_json(body)?;
        if !value.is_object() {
            return Err(EventsError::NotAList(json_kind(&value)));
        }

        let envelope: Envelope =
            serde_json::from_value(value).map_err(|e| EventsError::InvalidJson(e.to_string()))?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(EventsError::Graphql(messages.join("; ")));
        }

        let group = envelope
            .data
            .as_ref()
            .and_then(|data| data.get("groupByUrlname"))
            .filter(|group| !group.is_null())
            .ok_or_else(|| EventsError::Graphql("group not found".to_string()))?;

        let edges = group
            .pointer("/upcomingEvents/edges")
            .cloned()
            .unwrap_or(Value::Null);

        decode_each(expect_array(edges)?, edge_to_record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(edges: Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "data": { "groupByUrlname": { "upcomingEvents": { "edges": edges } } }
        }))
        .unwrap()
    }

    #[test]
    fn test_request_body_carries_variables() {
        let request = upcoming_events_request("rust-meetup", 20);

        assert_eq!(request["query"], UPCOMING_EVENTS_QUERY);
        assert_eq!(request["variables"]["urlname"], "rust-meetup");
        assert_eq!(request["variables"]["first"], 20);
    }

    #[test]
    fn test_normalizes_edges() {
        let body = body(json!([
            {"node": {"id": "300", "title": "Meetup", "dateTime": "2023-11-14T22:13:20Z", "going": 5}},
            {"node": {"id": 301, "title": "Hack night", "dateTime": "2023-11-21T18:30-05:00", "going": {"totalCount": 12}}}
        ]));

        let events = GraphqlNormalizer.normalize(&body).unwrap();

        assert_eq!(
            events,
            vec![
                EventRecord {
                    id: "300".to_string(),
                    title: "Meetup".to_string(),
                    start_time: Some(1_700_000_000_000),
                    external_rsvp_count: 5,
                },
                EventRecord {
                    id: "301".to_string(),
                    title: "Hack night".to_string(),
                    start_time: Some(1_700_609_400_000),
                    external_rsvp_count: 12,
                },
            ]
        );
    }

    #[test]
    fn test_missing_date_time_is_tolerated() {
        let body = body(json!([
            {"node": {"id": "1", "title": "A", "going": 3}},
            {"node": {"id": "2", "title": "B", "dateTime": null, "going": 1}}
        ]));

        let events = GraphqlNormalizer.normalize(&body).unwrap();

        assert_eq!(events[0].start_time, None);
        assert_eq!(events[0].external_rsvp_count, 3);
        assert_eq!(events[1].start_time, None);
    }

    #[test]
    fn test_empty_edges_is_valid() {
        assert!(GraphqlNormalizer.normalize(&body(json!([]))).unwrap().is_empty());
    }

    #[test]
    fn test_errors_without_data_fail() {
        let body = br#"{"data": null, "errors": [{"message": "Unauthorized"}]}"#;
        assert_eq!(
            GraphqlNormalizer.normalize(body),
            Err(EventsError::Graphql("Unauthorized".to_string()))
        );
    }

    #[test]
    fn test_unknown_group_fails() {
        let body = br#"{"data": {"groupByUrlname": null}}"#;
        assert_eq!(
            GraphqlNormalizer.normalize(body),
            Err(EventsError::Graphql("group not found".to_string()))
        );
    }

    #[test]
    fn test_non_object_payload_fails() {
        assert_eq!(
            GraphqlNormalizer.normalize(b"[]"),
            Err(EventsError::NotAList("array"))
        );
    }

    #[test]
    fn test_edges_not_a_list_fails() {
        assert_eq!(
            GraphqlNormalizer.normalize(&body(json!({"node": {}}))),
            Err(EventsError::NotAList("object"))
        );
    }

    #[test]
    fn test_bad_date_time_reports_index() {
        let body = body(json!([
            {"node": {"id": "1", "title": "A", "dateTime": "2023-11-14T22:13:20Z", "going": 1}},
            {"node": {"id": "2", "title": "B", "dateTime": "next tuesday", "going": 1}}
        ]));

        match GraphqlNormalizer.normalize(&body) {
            Err(EventsError::MalformedEvent { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("next tuesday"));
            }
            other => panic!("Expected MalformedEvent, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_date_time_offsets() {
        assert_eq!(parse_date_time("1970-01-01T00:00:00Z"), Ok(0));
        assert_eq!(parse_date_time("1970-01-01T01:00:00+01:00"), Ok(0));
        assert_eq!(parse_date_time("1970-01-01T00:01+00:00"), Ok(60_000));
    }
}
