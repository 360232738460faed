//! In-memory store backend.
//!
//! Nothing is evicted or expired; both documents live until the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use rsvpsync_core::store::{CasOutcome, KvStore, Result};

/// Thread-safe map of documents. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
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
        let mut values = self.values.write().await;

        if values.get(key).map(Vec::as_slice) != expected {
            return Ok(CasOutcome::Conflict);
        }

        values.insert(key.to_string(), value.to_vec());
        Ok(CasOutcome::Swapped)
    }
}
