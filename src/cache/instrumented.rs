//! Instrumented Cache Module
//!
//! Stores values under generated keys and reads them back, with every `store`
//! call counted and recorded in the call history.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::{decode_float, decode_integer, decode_text, StoredValue};
use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;
use crate::trace::{CallHistory, Traceable, TraceableExt, WithCounting, WithHistory};

/// Qualified name of the traced `store` operation.
pub const STORE_OPERATION: &str = "Cache.store";

// == Store Operation ==
/// The untraced write: fresh UUID key, value written verbatim.
pub struct StoreOp {
    store: Arc<dyn KeyValueStore>,
}

impl StoreOp {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Traceable for StoreOp {
    type Input = StoredValue;
    type Output = String;

    fn qualified_name(&self) -> &str {
        STORE_OPERATION
    }

    async fn invoke(&self, data: StoredValue) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        let bytes = data.to_bytes();
        let size = bytes.len();
        self.store.set(&key, bytes).await?;
        debug!("stored {} bytes under {}", size, key);
        Ok(key)
    }
}

// == Instrumented Cache ==
/// Store-backed cache whose `store` calls are counted and recorded.
///
/// Holds no state beyond the shared store handle.
pub struct InstrumentedCache {
    store: Arc<dyn KeyValueStore>,
    store_op: WithHistory<WithCounting<StoreOp>>,
}

impl InstrumentedCache {
    /// Creates the cache and flushes the backing store.
    pub async fn new(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        store.flushdb().await?;
        info!("Instrumented cache initialized, store flushed");

        let store_op = StoreOp::new(store.clone())
            .counted(store.clone())
            .with_history(store.clone());

        Ok(Self { store, store_op })
    }

    /// Handle to the backing store.
    pub fn store_handle(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    // == Store ==
    /// Writes `data` under a new random key and returns the key.
    pub async fn store(&self, data: impl Into<StoredValue>) -> Result<String> {
        self.store_op.invoke(data.into()).await
    }

    // == Get ==
    /// Raw bytes under `key`, or `None` when the key is absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Reads `key` and applies `decode` to the raw bytes.
    ///
    /// An absent key is `Ok(None)`; a failing decoder is `CacheError::Decode`.
    pub async fn get_with<T, E, F>(&self, key: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        match self.get(key).await? {
            Some(raw) => decode(raw)
                .map(Some)
                .map_err(|e| CacheError::Decode(e.to_string())),
            None => Ok(None),
        }
    }

    pub async fn get_as_text(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_text).await
    }

    pub async fn get_as_integer(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, decode_integer).await
    }

    pub async fn get_as_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, decode_float).await
    }

    /// Counter value for a traced operation; 0 when it never ran.
    pub async fn call_count(&self, name: &str) -> Result<i64> {
        Ok(self.get_as_integer(name).await?.unwrap_or(0))
    }

    /// Recorded history of this cache's `store` calls.
    pub async fn store_history(&self) -> Result<CallHistory> {
        CallHistory::load(self.store.as_ref(), STORE_OPERATION).await
    }
}
