//! Error types for the cache layer and store server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for stores, caches and the store server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing store could not be reached or failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Retrieved bytes could not be decoded into the requested type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Remote page source returned a failure
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Key not found (server side only, clients see an absent value)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Operation against a key holding the wrong kind of value
    #[error("Wrong type: {0}")]
    WrongType(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// HTTP status used when the error crosses the store server boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::FetchFailed(_) => StatusCode::BAD_GATEWAY,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::WrongType(_) => StatusCode::CONFLICT,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message carried by the error, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            CacheError::StoreUnavailable(msg)
            | CacheError::Decode(msg)
            | CacheError::FetchFailed(msg)
            | CacheError::NotFound(msg)
            | CacheError::WrongType(msg)
            | CacheError::InvalidRequest(msg)
            | CacheError::Internal(msg) => msg,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.message()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
