//! Cache Module
//!
//! Instrumented key-value cache with typed retrieval.

mod instrumented;
mod value;

// Re-export public types
pub use instrumented::{InstrumentedCache, StoreOp, STORE_OPERATION};
pub use value::{decode_float, decode_integer, decode_text, DecodeError, StoredValue};
