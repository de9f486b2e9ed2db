//! Traced Cache - instrumented key-value caching
//!
//! Stores values under generated keys with call counting and call history,
//! replays recorded calls, and caches fetched pages with expiration and
//! access counting. Everything runs against a `KeyValueStore`: in-process
//! (`MemoryStore`) or remote (`HttpStore` talking to the bundled store server).

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod page;
pub mod store;
pub mod tasks;
pub mod trace;

pub use api::AppState;
pub use cache::{InstrumentedCache, StoredValue};
pub use config::Config;
pub use error::{CacheError, Result};
pub use page::{ExpiringPageCache, HttpFetcher, PageFetcher};
pub use store::{HttpStore, KeyValueStore, MemoryStore};
pub use tasks::spawn_cleanup_task;
pub use trace::{replay, CallHistory, Traceable, TraceableExt};
