//! Keyspace Module
//!
//! Synchronous storage engine: byte strings and lists under string keys,
//! with optional per-key expiration.

use std::collections::HashMap;

use crate::error::{CacheError, Result};
use crate::store::{StoreEntry, StoreStats, StoredData, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Keyspace ==
/// In-memory keyspace with TTL support.
#[derive(Debug, Default)]
pub struct Keyspace {
    /// Key-value storage
    entries: HashMap<String, StoreEntry>,
    /// Lookup statistics
    stats: StoreStats,
}

impl Keyspace {
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Retrieves the byte string stored under `key`.
    ///
    /// Missing and expired keys yield `None`. Expired entries are removed.
    pub fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        self.purge_if_expired(key);

        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                match &entry.data {
                    StoredData::Bytes(value) => Ok(Some(value.clone())),
                    other => Err(wrong_type(key, other)),
                }
            }
            None => {
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Set ==
    /// Stores a byte string, replacing any previous value and expiry.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL in seconds; `Some(0)` is rejected
    pub fn set(&mut self, key: &str, value: Vec<u8>, ttl: Option<u64>) -> Result<()> {
        validate_key(key)?;
        validate_value(&value)?;
        if ttl == Some(0) {
            return Err(CacheError::InvalidRequest(
                "TTL must be greater than zero".to_string(),
            ));
        }

        let entry = StoreEntry::new(StoredData::Bytes(value), ttl);
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Incr ==
    /// Atomically adds one to the integer stored under `key`.
    ///
    /// A missing key starts at 0. The key's expiry, if any, is kept.
    pub fn incr(&mut self, key: &str) -> Result<i64> {
        validate_key(key)?;
        self.purge_if_expired(key);

        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::new(StoredData::Bytes(b"0".to_vec()), None));

        let current = match &entry.data {
            StoredData::Bytes(value) => std::str::from_utf8(value)
                .ok()
                .and_then(|text| text.parse::<i64>().ok())
                .ok_or_else(|| {
                    CacheError::WrongType(format!("value at '{}' is not an integer", key))
                })?,
            other => return Err(wrong_type(key, other)),
        };

        let next = current.checked_add(1).ok_or_else(|| {
            CacheError::InvalidRequest(format!("increment of '{}' would overflow", key))
        })?;
        entry.data = StoredData::Bytes(next.to_string().into_bytes());
        self.stats.set_total_entries(self.entries.len());

        Ok(next)
    }

    // == RPush ==
    /// Appends `value` to the list under `key`, creating it if needed.
    ///
    /// Returns the list length after the push.
    pub fn rpush(&mut self, key: &str, value: Vec<u8>) -> Result<usize> {
        validate_key(key)?;
        validate_value(&value)?;
        self.purge_if_expired(key);

        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::new(StoredData::List(Vec::new()), None));

        let length = match &mut entry.data {
            StoredData::List(items) => {
                items.push(value);
                items.len()
            }
            other => return Err(wrong_type(key, other)),
        };
        self.stats.set_total_entries(self.entries.len());

        Ok(length)
    }

    // == LRange ==
    /// Returns list items between `start` and `stop`, both inclusive.
    ///
    /// Negative indices count from the end (`-1` is the last item).
    /// A missing key reads as an empty list.
    pub fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        self.purge_if_expired(key);

        let items = match self.entries.get(key) {
            Some(entry) => match &entry.data {
                StoredData::List(items) => items,
                other => return Err(wrong_type(key, other)),
            },
            None => return Ok(Vec::new()),
        };

        Ok(match resolve_range(items.len(), start, stop) {
            Some((from, to)) => items[from..=to].to_vec(),
            None => Vec::new(),
        })
    }

    // == Flush ==
    /// Removes every key.
    pub fn flush(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Remaining TTL in milliseconds for a live key with an expiry.
    pub fn ttl_remaining_ms(&mut self, key: &str) -> Option<u64> {
        self.purge_if_expired(key);
        self.entries.get(key).and_then(StoreEntry::ttl_remaining_ms)
    }

    /// Returns current keyspace statistics.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_if_expired(&mut self, key: &str) {
        if self.entries.get(key).is_some_and(StoreEntry::is_expired) {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

fn validate_value(value: &[u8]) -> Result<()> {
    if value.len() > MAX_VALUE_SIZE {
        return Err(CacheError::InvalidRequest(format!(
            "Value exceeds maximum size of {} bytes",
            MAX_VALUE_SIZE
        )));
    }
    Ok(())
}

fn wrong_type(key: &str, data: &StoredData) -> CacheError {
    CacheError::WrongType(format!("key '{}' holds a {} value", key, data.kind()))
}

/// Maps Redis-style inclusive indices onto a slice range.
pub(crate) fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    if len == 0 {
        return None;
    }
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}
