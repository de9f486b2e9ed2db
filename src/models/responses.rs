//! Response DTOs for the store server API
//!
//! Shared by the server handlers and the `HttpStore` client.

use serde::{Deserialize, Serialize};

use crate::store::StoreStats;

/// Response body for the SET operation (PUT /set/:key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the INCR operation (POST /incr/:key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrResponse {
    pub key: String,
    /// Value after the increment
    pub value: i64,
}

impl IncrResponse {
    pub fn new(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the RPUSH operation (POST /rpush/:key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushResponse {
    pub key: String,
    /// List length after the push
    pub length: usize,
}

impl PushResponse {
    pub fn new(key: impl Into<String>, length: usize) -> Self {
        Self {
            key: key.into(),
            length,
        }
    }
}

/// Response body for the LRANGE operation (GET /lrange/:key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeResponse {
    pub key: String,
    /// Raw list items in list order
    pub values: Vec<Vec<u8>>,
}

impl RangeResponse {
    pub fn new(key: impl Into<String>, values: Vec<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }
}

/// Response body for the FLUSHDB operation (POST /flushdb)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlushResponse {
    pub message: String,
}

impl FlushResponse {
    pub fn flushed() -> Self {
        Self {
            message: "All keys flushed".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Number of lookups that found a live key
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of entries dropped after their TTL elapsed
    pub expirations: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}
