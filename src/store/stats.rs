//! Store Statistics Module
//!
//! Tracks keyspace lookup metrics including hits, misses, and expirations.

use serde::Serialize;

// == Store Stats ==
/// Tracks keyspace performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of lookups that found a live key
    pub hits: u64,
    /// Number of lookups that found nothing (missing or expired)
    pub misses: u64,
    /// Number of entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Current number of entries in the keyspace
    pub total_entries: usize,
}

impl StoreStats {
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stats_report_no_hit_rate() {
        let stats = StoreStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.expirations, 0);
    }

    #[test]
    fn test_expired_lookup_counts_as_miss_and_expiration() {
        let mut stats = StoreStats::new();
        // live read, then a read that finds the key expired
        stats.record_hit();
        stats.record_miss();
        stats.record_expirations(1);

        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_sweep_expirations_leave_hit_rate_alone() {
        let mut stats = StoreStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        stats.record_expirations(5);
        stats.set_total_entries(2);

        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(stats.expirations, 5);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut stats = StoreStats::new();
        stats.record_miss();
        stats.record_expirations(2);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["misses"], 1);
        assert_eq!(json["expirations"], 2);
        assert!(json.get("evictions").is_none());
    }
}
