//! Key-value store backend implementations.
//!
//! This module provides concrete implementations of
//! `rsvpsync_core::store::KvStore`. The backend is selected at compile time
//! via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): process-local map, lost on restart
//! - `sqlite`: single `kv` table in a SQLite file
//! - `redis`: plain Redis strings, compare-and-swap through a Lua script
//!
//! These features are mutually exclusive.

#[cfg(all(feature = "memory", feature = "sqlite"))]
compile_error!(
    "Features 'memory' and 'sqlite' are mutually exclusive. \
    Enable only one store backend at a time."
);

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one store backend at a time."
);

#[cfg(all(feature = "sqlite", feature = "redis"))]
compile_error!(
    "Features 'sqlite' and 'redis' are mutually exclusive. \
    Enable only one store backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "sqlite", feature = "redis")))]
compile_error!(
    "No store backend selected. Enable 'memory', 'sqlite' or 'redis' feature. \
    Example: cargo build -p rsvpsync --no-default-features --features sqlite"
);

#[cfg(any(test, feature = "memory"))]
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

#[cfg(feature = "redis")]
pub use redis_impl::RedisStore;
