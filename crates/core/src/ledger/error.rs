use thiserror::Error;

/// Errors that can occur when validating RSVPs or decoding the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("event_id is required")]
    MissingEventId,
    #[error("name is required")]
    MissingName,
    #[error("Ledger document is corrupt: {0}")]
    Corrupt(String),
    #[error("Ledger update abandoned after {0} conflicting attempts")]
    Contention(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(LedgerError::MissingEventId.to_string(), "event_id is required");
        assert_eq!(LedgerError::MissingName.to_string(), "name is required");
    }

    #[test]
    fn test_corrupt_display() {
        assert_eq!(
            LedgerError::Corrupt("expected a map".to_string()).to_string(),
            "Ledger document is corrupt: expected a map"
        );
    }

    #[test]
    fn test_contention_display() {
        assert_eq!(
            LedgerError::Contention(5).to_string(),
            "Ledger update abandoned after 5 conflicting attempts"
        );
    }
}
