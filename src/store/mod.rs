//! Store Module
//!
//! The key-value store abstraction consumed by the caches, plus an in-memory
//! backend with TTL expiration and an HTTP client backend.

mod entry;
mod keyspace;
mod memory;
mod remote;
mod stats;


use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::{current_timestamp_ms, StoreEntry, StoredData};
pub use keyspace::Keyspace;
pub use memory::MemoryStore;
pub use remote::HttpStore;
pub use stats::StoreStats;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Key Value Store ==
/// Remote associative store addressed by string keys.
///
/// Implementations must make `incr` atomic: concurrent increments on the same
/// key never lose updates. Handles are shared across components, usually as
/// `Arc<dyn KeyValueStore>`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Raw bytes under `key`, or `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, clearing any previous expiry.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Adds one to the integer under `key` (absent counts as 0).
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the tail of the list under `key`; returns the new length.
    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize>;

    /// Inclusive range of list items; negative indices count from the end.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Stores `value` under `key` for `ttl_secs` seconds.
    async fn setex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()>;

    /// Removes every key.
    async fn flushdb(&self) -> Result<()>;
}
