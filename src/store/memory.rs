//! In-process store backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::{KeyValueStore, Keyspace, StoreStats};

/// Shared in-memory store.
///
/// Cloning is cheap and every clone sees the same keyspace. All operations
/// take the write lock (lookups update statistics and purge expired keys), so
/// conflicting operations are serialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    keyspace: Arc<RwLock<Keyspace>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current keyspace statistics.
    pub async fn stats(&self) -> StoreStats {
        self.keyspace.read().await.stats()
    }

    /// Drops expired entries, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.keyspace.write().await.cleanup_expired()
    }

    /// Number of keys currently held, including not-yet-purged expired ones.
    pub async fn len(&self) -> usize {
        self.keyspace.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keyspace.read().await.is_empty()
    }

    /// Remaining TTL in milliseconds for `key`, if it has one.
    pub async fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        self.keyspace.write().await.ttl_remaining_ms(key)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.keyspace.write().await.get(key)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.keyspace.write().await.set(key, value, None)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.keyspace.write().await.incr(key)
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        self.keyspace.write().await.rpush(key, value)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        self.keyspace.write().await.lrange(key, start, stop)
    }

    async fn setex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()> {
        self.keyspace.write().await.set(key, value, Some(ttl_secs))
    }

    async fn flushdb(&self) -> Result<()> {
        self.keyspace.write().await.flush();
        Ok(())
    }
}
