//! Redis store implementation.
//!
//! Documents are plain string values. Compare-and-swap runs as a Lua
//! script so the comparison and the write happen in one atomic step.

use async_trait::async_trait;
use redis::AsyncCommands;

use rsvpsync_core::store::{CasOutcome, KvStore, Result};

use super::error::map_redis_error;

/// KEYS[1] = key, ARGV[1] = "1" if a current value is expected,
/// ARGV[2] = expected value, ARGV[3] = new value.
const CAS_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if ARGV[1] == '1' then
    if current ~= ARGV[2] then
        return 0
    end
elseif current then
    return 0
end
redis.call('SET', KEYS[1], ARGV[3])
return 1
"#;

/// Redis store backend using connection manager for pooling.
pub struct RedisStore {
    conn: redis::aio::ConnectionManager,
    cas_script: redis::Script,
}

impl RedisStore {
    /// Creates a new Redis store connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self {
            conn,
            cas_script: redis::Script::new(CAS_SCRIPT),
        })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(map_redis_error)
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
        let mut conn = self.conn.clone();
        let (has_expected, expected) = match expected {
            Some(bytes) => ("1", bytes),
            None => ("0", &[][..]),
        };

        let swapped: i32 = self
            .cas_script
            .key(key)
            .arg(has_expected)
            .arg(expected)
            .arg(value)
            .invoke_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        Ok(if swapped == 1 {
            CasOutcome::Swapped
        } else {
            CasOutcome::Conflict
        })
    }
}
