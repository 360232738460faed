//! Pure functions for validating RSVPs and (de)serializing the ledger.

use super::{LedgerDocument, LedgerError, Rsvp};

/// Validates raw RSVP input.
///
/// Both fields are trimmed. A missing or blank event id or name is rejected.
pub fn validate_rsvp(event_id: Option<&str>, raw_name: Option<&str>) -> Result<Rsvp, LedgerError> {
    let event_id = event_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(LedgerError::MissingEventId)?;

    let name = raw_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(LedgerError::MissingName)?;

    Ok(Rsvp {
        event_id: event_id.to_string(),
        name: name.to_string(),
    })
}

/// Decodes and validates a stored ledger document.
///
/// The document must be an object of string arrays. Every name must be
/// trimmed, non-empty and unique within its event. Anything else is
/// reported as [`LedgerError::Corrupt`] instead of being merged.
pub fn parse_ledger(bytes: &[u8]) -> Result<LedgerDocument, LedgerError> {
    let document: LedgerDocument =
        serde_json::from_slice(bytes).map_err(|e| LedgerError::Corrupt(e.to_string()))?;

    for (event_id, names) in document.as_map() {
        if event_id.is_empty() {
            return Err(LedgerError::Corrupt("empty event id".to_string()));
        }

        for (index, name) in names.iter().enumerate() {
            if name.is_empty() || name.trim() != name {
                return Err(LedgerError::Corrupt(format!(
                    "event {event_id}: name at index {index} is blank or untrimmed"
                )));
            }
            if names[..index].contains(name) {
                return Err(LedgerError::Corrupt(format!(
                    "event {event_id}: duplicate name at index {index}"
                )));
            }
        }
    }

    Ok(document)
}

/// Serializes the ledger to JSON bytes.
pub fn serialize_ledger(document: &LedgerDocument) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(document).map_err(|e| LedgerError::Corrupt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_name() {
        let rsvp = validate_rsvp(Some("1"), Some("  Ada  ")).unwrap();
        assert_eq!(rsvp.event_id(), "1");
        assert_eq!(rsvp.name(), "Ada");
    }

    #[test]
    fn test_validate_trims_event_id() {
        let rsvp = validate_rsvp(Some(" 42 "), Some("Ada")).unwrap();
        assert_eq!(rsvp.event_id(), "42");
    }

    #[test]
    fn test_validate_rejects_missing_event_id() {
        assert_eq!(
            validate_rsvp(None, Some("Ada")),
            Err(LedgerError::MissingEventId)
        );
    }

    #[test]
    fn test_validate_rejects_empty_event_id() {
        assert_eq!(
            validate_rsvp(Some(""), Some("Ada")),
            Err(LedgerError::MissingEventId)
        );
        assert_eq!(
            validate_rsvp(Some("   "), Some("Ada")),
            Err(LedgerError::MissingEventId)
        );
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert_eq!(validate_rsvp(Some("1"), None), Err(LedgerError::MissingName));
        assert_eq!(
            validate_rsvp(Some("1"), Some(" \n\t ")),
            Err(LedgerError::MissingName)
        );
    }

    #[test]
    fn test_parse_valid_document() {
        let doc = parse_ledger(br#"{"1":["Ada","Grace"],"2":[]}"#).unwrap();
        assert_eq!(doc.names("1"), ["Ada", "Grace"]);
        assert!(doc.names("2").is_empty());
    }

    #[test]
    fn test_parse_empty_object() {
        let doc = parse_ledger(b"{}").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        for bytes in [&b"[]"[..], b"null", b"\"data\"", b"not json"] {
            assert!(
                matches!(parse_ledger(bytes), Err(LedgerError::Corrupt(_))),
                "expected corrupt for {}",
                String::from_utf8_lossy(bytes)
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_string_names() {
        let result = parse_ledger(br#"{"1":[1,2]}"#);
        assert!(matches!(result, Err(LedgerError::Corrupt(_))));
    }

    #[test]
    fn test_parse_rejects_untrimmed_name() {
        let result = parse_ledger(br#"{"1":[" Ada"]}"#);
        assert!(matches!(result, Err(LedgerError::Corrupt(_))));
    }

    #[test]
    fn test_parse_rejects_duplicate_names() {
        let result = parse_ledger(br#"{"1":["Ada","Ada"]}"#);
        assert!(matches!(result, Err(LedgerError::Corrupt(_))));
    }

    #[test]
    fn test_parse_rejects_empty_event_id() {
        let result = parse_ledger(br#"{"":["Ada"]}"#);
        assert!(matches!(result, Err(LedgerError::Corrupt(_))));
    }

    #[test]
    fn test_serialize_matches_wire_format() {
        let mut doc = LedgerDocument::new();
        doc.append(&validate_rsvp(Some("1"), Some("Ada")).unwrap());

        let bytes = serialize_ledger(&doc).unwrap();

        assert_eq!(bytes, br#"{"1":["Ada"]}"#);
        assert_eq!(parse_ledger(&bytes).unwrap(), doc);
    }
}
