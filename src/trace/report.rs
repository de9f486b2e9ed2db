//! Replay Report Module
//!
//! Rebuilds a human-readable call history from a counter and its history lists.

use std::fmt;
use std::io::Write;

use tracing::warn;

use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;
use crate::trace::{inputs_key, outputs_key};

/// Recorded calls of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CallHistory {
    pub name: String,
    /// Counter value; may exceed the history length
    pub call_count: i64,
    /// (input, output) pairs in recording order
    pub calls: Vec<(String, String)>,
}

impl CallHistory {
    /// Loads the counter and history lists for `name`.
    ///
    /// A missing or unreadable counter counts as 0. When the lists differ in
    /// length, only complete pairs are kept.
    pub async fn load(store: &dyn KeyValueStore, name: &str) -> Result<Self> {
        let call_count = match store.get(name).await {
            Ok(Some(raw)) => parse_count(name, &raw),
            Ok(None) => 0,
            Err(CacheError::WrongType(msg)) => {
                warn!("counter for {} is not a string value: {}", name, msg);
                0
            }
            Err(e) => return Err(e),
        };

        let inputs = store.lrange(&inputs_key(name), 0, -1).await?;
        let outputs = store.lrange(&outputs_key(name), 0, -1).await?;
        if inputs.len() != outputs.len() {
            warn!(
                "{} has {} inputs but {} outputs; showing complete pairs only",
                name,
                inputs.len(),
                outputs.len()
            );
        }

        let calls = inputs
            .iter()
            .zip(outputs.iter())
            .map(|(input, output)| {
                (
                    String::from_utf8_lossy(input).into_owned(),
                    String::from_utf8_lossy(output).into_owned(),
                )
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            call_count,
            calls,
        })
    }
}

fn parse_count(name: &str, raw: &[u8]) -> i64 {
    match std::str::from_utf8(raw).ok().and_then(|s| s.parse().ok()) {
        Some(count) => count,
        None => {
            warn!("counter for {} is not an integer, treating as 0", name);
            0
        }
    }
}

impl fmt::Display for CallHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.name, self.call_count)?;
        for (input, output) in &self.calls {
            writeln!(f, "{}(*{}) -> {}", self.name, input, output)?;
        }
        Ok(())
    }
}

/// Writes the call history report for `name` to `out`.
pub async fn replay<W: Write>(store: &dyn KeyValueStore, name: &str, out: &mut W) -> Result<()> {
    let history = CallHistory::load(store, name).await?;
    write!(out, "{}", history)
        .map_err(|e| CacheError::Internal(format!("failed to write replay: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_replay_unknown_operation() {
        let store = MemoryStore::new();
        let mut out = Vec::new();

        replay(&store, "Nothing.here", &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Nothing.here was called 0 times:\n"
        );
    }

    #[tokio::test]
    async fn test_replay_pairs_in_order() {
        let store = MemoryStore::new();
        for (input, output) in [("(1,)", "a"), ("(2,)", "b")] {
            store.incr("Op.run").await.unwrap();
            store.rpush("Op.run:inputs", input.into()).await.unwrap();
            store.rpush("Op.run:outputs", output.into()).await.unwrap();
        }
        let mut out = Vec::new();

        replay(&store, "Op.run", &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Op.run was called 2 times:\nOp.run(*(1,)) -> a\nOp.run(*(2,)) -> b\n"
        );
    }

    #[tokio::test]
    async fn test_short_history_truncates_to_pairs() {
        let store = MemoryStore::new();
        store.set("Op.run", b"5".to_vec()).await.unwrap();
        for input in ["(1,)", "(2,)", "(3,)"] {
            store.rpush("Op.run:inputs", input.into()).await.unwrap();
        }
        store.rpush("Op.run:outputs", b"only".to_vec()).await.unwrap();

        let history = CallHistory::load(&store, "Op.run").await.unwrap();

        assert_eq!(history.call_count, 5);
        assert_eq!(history.calls, vec![("(1,)".to_string(), "only".to_string())]);
    }

    #[tokio::test]
    async fn test_unparsable_counter_reads_as_zero() {
        let store = MemoryStore::new();
        store.set("Op.run", b"many".to_vec()).await.unwrap();

        let history = CallHistory::load(&store, "Op.run").await.unwrap();

        assert_eq!(history.call_count, 0);
        assert!(history.calls.is_empty());
    }
}
