//! SQLite schema definitions and SQL query constants.

/// SQL statement to create the document table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL
);
"#;

pub const SELECT_VALUE: &str = r#"
SELECT value
FROM kv
WHERE key = ?1
"#;

pub const UPSERT_VALUE: &str = r#"
INSERT INTO kv (key, value)
VALUES (?1, ?2)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
"#;

/// Inserts only when the key is absent. One changed row means success.
pub const INSERT_IF_ABSENT: &str = r#"
INSERT INTO kv (key, value)
VALUES (?1, ?2)
ON CONFLICT(key) DO NOTHING
"#;

/// Replaces only when the stored value still equals ?3.
pub const UPDATE_IF_MATCHES: &str = r#"
UPDATE kv
SET value = ?2
WHERE key = ?1 AND value = ?3
"#;
