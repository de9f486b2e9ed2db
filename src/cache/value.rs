//! Stored Value Module
//!
//! Tagged values accepted by `InstrumentedCache::store` and the decoders used
//! to turn raw store bytes back into typed values.

use std::fmt;

use thiserror::Error;

use crate::error::CacheError;

// == Stored Value ==
/// A value accepted by the cache. The store itself keeps only bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl StoredValue {
    /// Serialized form written to the store.
    ///
    /// Integers are base-10 text; floats always carry a fractional part.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Bytes(bytes) => bytes.clone(),
            StoredValue::Integer(n) => n.to_string().into_bytes(),
            StoredValue::Float(x) => format!("{:?}", x).into_bytes(),
        }
    }
}

/// Rendered form used in call history: `'text'`, `b'bytes'`, `42`, `1.5`.
impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Text(text) => write_quoted(f, text),
            StoredValue::Bytes(bytes) => write!(f, "b'{}'", bytes.escape_ascii()),
            StoredValue::Integer(n) => write!(f, "{}", n),
            StoredValue::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// Quotes text the way call history shows it: single quotes unless the text
/// holds a single quote and no double quote. Printable non-ASCII is kept as is.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    write!(f, "{}", quote)?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "{}", quote)
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for StoredValue {
    fn from(value: &[u8; N]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Integer(value.into())
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

// == Decoders ==
/// Failure of one of the built-in decoders.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct DecodeError(pub String);

impl From<DecodeError> for CacheError {
    fn from(err: DecodeError) -> Self {
        CacheError::Decode(err.0)
    }
}

/// UTF-8 text decoder.
pub fn decode_text(bytes: Vec<u8>) -> Result<String, DecodeError> {
    String::from_utf8(bytes).map_err(|e| DecodeError(e.to_string()))
}

/// Base-10 integer decoder. Surrounding whitespace is not accepted.
pub fn decode_integer(bytes: Vec<u8>) -> Result<i64, DecodeError> {
    let text = decode_text(bytes)?;
    text.parse()
        .map_err(|e| DecodeError(format!("'{}' is not an integer: {}", text, e)))
}

/// Floating-point decoder.
pub fn decode_float(bytes: Vec<u8>) -> Result<f64, DecodeError> {
    let text = decode_text(bytes)?;
    text.parse()
        .map_err(|e| DecodeError(format!("'{}' is not a float: {}", text, e)))
}
