/// Store key holding the cached access token record.
pub const TOKEN_KEY: &str = "meetup_access";

/// Store key holding the RSVP ledger document.
pub const LEDGER_KEY: &str = "data";
