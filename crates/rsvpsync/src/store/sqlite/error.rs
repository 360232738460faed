//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StoreError` from
//! `rsvpsync_core::store`.

use rsvpsync_core::store::StoreError;

/// Maps a rusqlite error to a StoreError.
///
/// - `CannotOpen`, `DatabaseBusy` and `DatabaseLocked` -> `ConnectionFailed`
/// - All other errors -> `OperationFailed`
fn map_rusqlite_error(err: &rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen
                    | rusqlite::ErrorCode::DatabaseBusy
                    | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            StoreError::ConnectionFailed(format!("SQLite unavailable: {err}"))
        }
        _ => StoreError::OperationFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a StoreError.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> StoreError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            StoreError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => StoreError::OperationFailed(err.to_string()),
    }
}
