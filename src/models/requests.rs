//! Request DTOs for the store server API
//!
//! Values travel as raw request bodies; these are the query-string parameters.

use serde::{Deserialize, Serialize};

/// Query parameters for the SET operation (PUT /set/:key)
///
/// # Fields
/// - `ttl`: Optional TTL in seconds; when present the write behaves like SETEX
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetQuery {
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Query parameters for the LRANGE operation (GET /lrange/:key)
///
/// Both bounds are inclusive and default to the whole list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub start: i64,
    #[serde(default = "default_stop")]
    pub stop: i64,
}

fn default_stop() -> i64 {
    -1
}

impl Default for RangeQuery {
    fn default() -> Self {
        Self {
            start: 0,
            stop: default_stop(),
        }
    }
}
