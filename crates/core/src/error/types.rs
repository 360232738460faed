use thiserror::Error;

use crate::events::EventsError;
use crate::ledger::LedgerError;
use crate::store::StoreError;
use crate::token::TokenError;

/// Errors surfaced to API callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request itself is unacceptable.
    #[error("{0}")]
    Validation(String),
    /// The access token could not be obtained.
    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),
    /// The events API failed or could not be reached.
    #[error("Meetup API error: {message}")]
    UpstreamApi {
        status: Option<u16>,
        message: String,
    },
    /// The events API answered with something other than a list of events.
    #[error("Unexpected Meetup response: {0}")]
    UpstreamShape(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::UpstreamAuth(_) => "upstream_auth_error",
            ServiceError::UpstreamApi { .. } => "upstream_api_error",
            ServiceError::UpstreamShape(_) => "upstream_shape_error",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// Upstream HTTP status, when the events API answered with one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ServiceError::UpstreamApi { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(error: TokenError) -> Self {
        ServiceError::UpstreamAuth(error.to_string())
    }
}

impl From<EventsError> for ServiceError {
    fn from(error: EventsError) -> Self {
        match error {
            EventsError::Request(message) => ServiceError::UpstreamApi {
                status: None,
                message,
            },
            EventsError::Status { status } => ServiceError::UpstreamApi {
                status: Some(status),
                message: error.to_string(),
            },
            other => ServiceError::UpstreamShape(other.to_string()),
        }
    }
}

impl From<LedgerError> for ServiceError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::MissingEventId | LedgerError::MissingName => {
                ServiceError::Validation(error.to_string())
            }
            LedgerError::Corrupt(_) | LedgerError::Contention(_) => {
                ServiceError::Internal(error.to_string())
            }
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        ServiceError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            ServiceError::Validation("x".into()).code(),
            "validation_error"
        );
        assert_eq!(
            ServiceError::UpstreamAuth("x".into()).code(),
            "upstream_auth_error"
        );
        assert_eq!(
            ServiceError::UpstreamApi {
                status: None,
                message: "x".into()
            }
            .code(),
            "upstream_api_error"
        );
        assert_eq!(
            ServiceError::UpstreamShape("x".into()).code(),
            "upstream_shape_error"
        );
        assert_eq!(ServiceError::Internal("x".into()).code(), "internal_error");
    }

    #[test]
    fn test_token_errors_are_upstream_auth() {
        let error: ServiceError = TokenError::Rejected {
            status: 400,
            body: "invalid_grant".to_string(),
        }
        .into();

        assert_eq!(
            error,
            ServiceError::UpstreamAuth("Token endpoint returned 400: invalid_grant".to_string())
        );
    }

    #[test]
    fn test_events_status_keeps_upstream_status() {
        let error: ServiceError = EventsError::Status { status: 503 }.into();

        assert_eq!(error.upstream_status(), Some(503));
        assert_eq!(error.code(), "upstream_api_error");
    }

    #[test]
    fn test_events_transport_failure_has_no_status() {
        let error: ServiceError = EventsError::Request("connection refused".to_string()).into();

        assert_eq!(
            error,
            ServiceError::UpstreamApi {
                status: None,
                message: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn test_events_shape_failures() {
        for source in [
            EventsError::NotAList("object"),
            EventsError::InvalidJson("eof".to_string()),
            EventsError::UnexpectedContentType("text/html".to_string()),
            EventsError::Graphql("group not found".to_string()),
            EventsError::MalformedEvent {
                index: 0,
                reason: "missing field".to_string(),
            },
        ] {
            let error: ServiceError = source.into();
            assert_eq!(error.code(), "upstream_shape_error");
        }
    }

    #[test]
    fn test_ledger_errors() {
        assert_eq!(
            ServiceError::from(LedgerError::MissingEventId),
            ServiceError::Validation("event_id is required".to_string())
        );
        assert_eq!(
            ServiceError::from(LedgerError::MissingName).code(),
            "validation_error"
        );
        assert_eq!(
            ServiceError::from(LedgerError::Corrupt("bad".to_string())).code(),
            "internal_error"
        );
        assert_eq!(
            ServiceError::from(LedgerError::Contention(5)).code(),
            "internal_error"
        );
    }

    #[test]
    fn test_store_errors_are_internal() {
        let error: ServiceError = StoreError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(error.code(), "internal_error");
    }
}
