//! Expiring Page Cache Module
//!
//! Cache-or-fetch layer over a `PageFetcher` with per-URL access counting.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{decode_integer, decode_text};
use crate::config::Config;
use crate::error::Result;
use crate::page::PageFetcher;
use crate::store::KeyValueStore;

/// Default lifetime of a cached page, in seconds.
pub const DEFAULT_PAGE_TTL: u64 = 10;

/// Store key holding the cached content of `url`.
pub fn cache_key(url: &str) -> String {
    format!("cache:{}", url)
}

/// Store key holding the access counter of `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

// == Cache Page ==
/// Serves `url` from the store while its entry is live, otherwise fetches it
/// and caches the content with a fixed expiry.
///
/// Hits never reset the expiry. Failed fetches cache nothing.
pub struct CachePage<F> {
    inner: F,
    store: Arc<dyn KeyValueStore>,
    expiration: u64,
}

impl<F: PageFetcher> CachePage<F> {
    /// `expiration` is in seconds; zero is raised to one.
    pub fn new(inner: F, store: Arc<dyn KeyValueStore>, expiration: u64) -> Self {
        Self {
            inner,
            store,
            expiration: expiration.max(1),
        }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for CachePage<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        let key = cache_key(url);
        if let Some(raw) = self.store.get(&key).await? {
            debug!("page cache hit for {}", url);
            return Ok(decode_text(raw)?);
        }

        debug!("page cache miss for {}", url);
        let content = self.inner.fetch(url).await?;
        self.store
            .setex(&key, self.expiration, content.clone().into_bytes())
            .await?;

        Ok(content)
    }
}

// == Count Access ==
/// Increments the URL's access counter before every fetch, hit or miss.
pub struct CountAccess<F> {
    inner: F,
    store: Arc<dyn KeyValueStore>,
}

impl<F: PageFetcher> CountAccess<F> {
    pub fn new(inner: F, store: Arc<dyn KeyValueStore>) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for CountAccess<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        let count = self.store.incr(&count_key(url)).await?;
        debug!("{} accessed {} times", url, count);
        self.inner.fetch(url).await
    }
}

// == Expiring Page Cache ==
/// Access-counted, expiring page cache over a fetcher.
pub struct ExpiringPageCache<F> {
    inner: CountAccess<CachePage<F>>,
    store: Arc<dyn KeyValueStore>,
}

impl<F: PageFetcher> ExpiringPageCache<F> {
    /// Creates a page cache with the default 10 second expiration.
    pub fn new(store: Arc<dyn KeyValueStore>, fetcher: F) -> Self {
        let cached = CachePage::new(fetcher, store.clone(), DEFAULT_PAGE_TTL);
        Self {
            inner: CountAccess::new(cached, store.clone()),
            store,
        }
    }

    /// Creates a page cache using `PAGE_CACHE_TTL` from the config.
    pub fn from_config(store: Arc<dyn KeyValueStore>, fetcher: F, config: &Config) -> Self {
        Self::new(store, fetcher).with_expiration(config.page_cache_ttl)
    }

    /// Sets the expiration, in seconds, applied to newly cached pages.
    ///
    /// The store rejects a zero expiry, so zero is raised to one second.
    pub fn with_expiration(mut self, seconds: u64) -> Self {
        self.inner.inner.expiration = seconds.max(1);
        self
    }

    pub fn expiration(&self) -> u64 {
        self.inner.inner.expiration
    }

    /// Content of `url`, from the cache when present.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.inner.fetch(url).await
    }

    /// Number of `fetch` calls made for `url`; 0 when never requested.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        match self.store.get(&count_key(url)).await? {
            Some(raw) => Ok(decode_integer(raw)?),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for ExpiringPageCache<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.inner.fetch(url).await
    }
}
