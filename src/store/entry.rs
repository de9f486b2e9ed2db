//! Store Entry Module
//!
//! Defines individual keyspace entries (byte strings or lists) with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Stored Data ==
/// Payload held under a key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredData {
    /// Plain byte string (SET / INCR / SETEX)
    Bytes(Vec<u8>),
    /// Ordered list of byte strings (RPUSH)
    List(Vec<Vec<u8>>),
}

impl StoredData {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            StoredData::Bytes(_) => "string",
            StoredData::List(_) => "list",
        }
    }
}

// == Store Entry ==
/// Represents a single keyspace entry with payload and metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored payload
    pub data: StoredData,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// # Arguments
    /// * `data` - The payload to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(data: StoredData, ttl_seconds: Option<u64>) -> Self {
        let now = current_timestamp_ms();
        // Saturates so that huge TTLs mean "far future" rather than wrapping
        let expires_at = ttl_seconds.map(|ttl| now.saturating_add(ttl.saturating_mul(1000)));

        Self {
            data,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
