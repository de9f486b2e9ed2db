//! Page Module
//!
//! URL-indexed page caching with expiration and access counting.

mod expiring;
mod fetcher;

pub use expiring::{
    cache_key, count_key, CachePage, CountAccess, ExpiringPageCache, DEFAULT_PAGE_TTL,
};
pub use fetcher::{HttpFetcher, PageFetcher};
