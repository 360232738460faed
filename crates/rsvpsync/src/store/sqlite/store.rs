//! SQLite store implementation.

use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use rsvpsync_core::store::{CasOutcome, KvStore, Result, StoreError};

use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-backed document store.
///
/// Conditional writes are single statements, so SQLite's own locking makes
/// them atomic across processes sharing the file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and its schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a store backed by an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl KvStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = key.to_string();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_VALUE, [&key], |row| row.get::<_, Vec<u8>>(0))
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let key = key.to_string();
        let value = value.to_vec();

        self.conn
            .call(move |conn| {
                conn.execute(schema::UPSERT_VALUE, rusqlite::params![key, value])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    fn supports_conditional_writes(&self) -> bool {
        true
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<CasOutcome> {
        let key = key.to_string();
        let expected = expected.map(<[u8]>::to_vec);
        let value = value.to_vec();

        let changed = self
            .conn
            .call(move |conn| {
                let changed = match expected {
                    None => conn.execute(schema::INSERT_IF_ABSENT, rusqlite::params![key, value]),
                    Some(expected) => conn.execute(
                        schema::UPDATE_IF_MATCHES,
                        rusqlite::params![key, value, expected],
                    ),
                };
                changed.map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(if changed == 1 {
            CasOutcome::Swapped
        } else {
            CasOutcome::Conflict
        })
    }
}
