use async_trait::async_trait;

use super::{Result, StoreError};

/// Outcome of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The stored value matched the expectation and was replaced.
    Swapped,
    /// Another writer changed the value first. Nothing was written.
    Conflict,
}

/// Durable key-value store holding whole JSON documents.
///
/// Reads and writes always move the full value; there are no partial
/// updates. Every replica of the service talks to the same store, so the
/// values here are the only state shared between requests.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Gets the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the value stored under `key`. Last writer wins.
    async fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Whether [`KvStore::compare_and_swap`] is available on this backend.
    fn supports_conditional_writes(&self) -> bool {
        false
    }

    /// Writes `value` only if the current value equals `expected`.
    ///
    /// `expected == None` means the key must be absent.
    async fn compare_and_swap(
        &self,
        _key: &str,
        _expected: Option<&[u8]>,
        _value: &[u8],
    ) -> Result<CasOutcome> {
        Err(StoreError::Unsupported)
    }
}
