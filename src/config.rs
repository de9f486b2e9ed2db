//! Configuration Module
//!
//! Loads server and client settings from environment variables.

use std::env;
use std::str::FromStr;

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port of the store server
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Base URL used by `HttpStore` to reach a store server
    pub store_url: String,
    /// Expiration in seconds for cached pages
    pub page_cache_ttl: u64,
    /// Timeout in seconds for outgoing HTTP requests
    pub http_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - Store server port (default: 6380)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `STORE_URL` - Remote store base URL (default: http://127.0.0.1:6380)
    /// - `PAGE_CACHE_TTL` - Page cache expiration in seconds, at least 1 (default: 10)
    /// - `HTTP_TIMEOUT` - Outgoing request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            store_url: env::var("STORE_URL").unwrap_or(defaults.store_url),
            page_cache_ttl: env_or("PAGE_CACHE_TTL", defaults.page_cache_ttl).max(1),
            http_timeout: env_or("HTTP_TIMEOUT", defaults.http_timeout),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 6380,
            cleanup_interval: 1,
            store_url: "http://127.0.0.1:6380".to_string(),
            page_cache_ttl: 10,
            http_timeout: 30,
        }
    }
}
