//! API Module
//!
//! HTTP handlers and routing for the store server REST API.
//!
//! # Endpoints
//! - `GET /get/:key`, `PUT /set/:key` - Byte string values
//! - `POST /incr/:key` - Atomic counters
//! - `POST /rpush/:key`, `GET /lrange/:key` - Lists
//! - `POST /flushdb` - Clear the store
//! - `GET /stats`, `GET /health` - Monitoring

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
