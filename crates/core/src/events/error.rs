use thiserror::Error;

/// Errors produced while fetching or normalizing upstream events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventsError {
    #[error("Events request failed: {0}")]
    Request(String),
    #[error("Events API returned status {status}")]
    Status { status: u16 },
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),
    #[error("Events payload is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("Events payload is not a list (found {0})")]
    NotAList(&'static str),
    #[error("Event at index {index} is malformed: {reason}")]
    MalformedEvent { index: usize, reason: String },
    #[error("GraphQL response error: {0}")]
    Graphql(String),
}
