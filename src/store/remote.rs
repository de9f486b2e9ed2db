//! HTTP client backend for a store exposed by the store server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{ErrorResponse, IncrResponse, PushResponse, RangeQuery, RangeResponse};
use crate::store::KeyValueStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Store handle talking to a remote store server over HTTP.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    /// Creates a client for the store server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client using `STORE_URL` and `HTTP_TIMEOUT` from the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(&config.store_url, Duration::from_secs(config.http_timeout))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            CacheError::InvalidRequest(format!("invalid store URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CacheError::InvalidRequest(format!(
                "store URL '{}' cannot be a base",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Builds `<base>/<operation>/<key>`, percent-encoding the key as one segment.
    fn endpoint(&self, operation: &str, key: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CacheError::InvalidRequest(format!(
                    "store URL '{}' cannot be a base",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty().push(operation);
            if let Some(key) = key {
                segments.push(key);
            }
        }
        Ok(url)
    }

    /// Sends the request and maps transport failures and error statuses.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| CacheError::StoreUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.json::<ErrorResponse>().await.ok();

        // A 404 without the store's error body comes from a route the store
        // server does not serve, not from a missing key.
        Err(match (status, body) {
            (StatusCode::NOT_FOUND, Some(body)) => CacheError::NotFound(body.error),
            (StatusCode::NOT_FOUND, None) => {
                CacheError::StoreUnavailable(format!("no store endpoint at {}", url))
            }
            (StatusCode::CONFLICT, body) => CacheError::WrongType(error_message(status, body)),
            (StatusCode::BAD_REQUEST, body) => {
                CacheError::InvalidRequest(error_message(status, body))
            }
            (_, body) => CacheError::StoreUnavailable(error_message(status, body)),
        })
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Option<u64>) -> Result<()> {
        let mut request = self.client.put(self.endpoint("set", Some(key))?).body(value);
        if let Some(ttl) = ttl {
            request = request.query(&[("ttl", ttl)]);
        }
        self.send(request).await?;
        Ok(())
    }
}

fn error_message(status: StatusCode, body: Option<ErrorResponse>) -> String {
    body.map(|body| body.error).unwrap_or_else(|| status.to_string())
}

fn body_error(e: reqwest::Error) -> CacheError {
    CacheError::StoreUnavailable(format!("malformed store response: {}", e))
}

#[async_trait]
impl KeyValueStore for HttpStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let request = self.client.get(self.endpoint("get", Some(key))?);
        match self.send(request).await {
            Ok(response) => {
                let bytes = response.bytes().await.map_err(body_error)?;
                Ok(Some(bytes.to_vec()))
            }
            Err(CacheError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.put(key, value, None).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let request = self.client.post(self.endpoint("incr", Some(key))?);
        let body: IncrResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(body_error)?;
        debug!("INCR {} -> {}", key, body.value);
        Ok(body.value)
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        let request = self
            .client
            .post(self.endpoint("rpush", Some(key))?)
            .body(value);
        let body: PushResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(body_error)?;
        Ok(body.length)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let request = self
            .client
            .get(self.endpoint("lrange", Some(key))?)
            .query(&RangeQuery { start, stop });
        let body: RangeResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(body_error)?;
        Ok(body.values)
    }

    async fn setex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()> {
        self.put(key, value, Some(ttl_secs)).await
    }

    async fn flushdb(&self) -> Result<()> {
        let request = self.client.post(self.endpoint("flushdb", None)?);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_key_as_single_segment() {
        let store = HttpStore::new("http://127.0.0.1:6380").unwrap();
        let url = store
            .endpoint("get", Some("cache:http://example.com/a?b=1"))
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:6380/get/cache:http:%2F%2Fexample.com%2Fa%3Fb=1"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let store = HttpStore::new("http://localhost:6380/store/").unwrap();
        let url = store.endpoint("flushdb", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:6380/store/flushdb");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpStore::new("not a url"),
            Err(CacheError::InvalidRequest(_))
        ));
        assert!(matches!(
            HttpStore::new("mailto:someone@example.com"),
            Err(CacheError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        // Grab a free port, then release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{}", port);
        let store = HttpStore::with_timeout(&url, Duration::from_secs(2)).unwrap();
        let result = store.get("anything").await;
        assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
    }
}
