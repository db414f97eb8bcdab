//! Load statistics.

use std::cell::Cell;

/// Counters for the manager's category cache.
#[derive(Debug, Default)]
pub struct LoadStats {
    loads: Cell<u64>,
    hits: Cell<u64>,
    failures: Cell<u64>,
}

impl LoadStats {
    pub(crate) fn record_load(&self) {
        self.loads.set(self.loads.get() + 1);
    }

    pub(crate) fn record_hit(&self) {
        self.hits.set(self.hits.get() + 1);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.set(self.failures.get() + 1);
    }

    /// Number of successful parses.
    pub fn loads(&self) -> u64 {
        self.loads.get()
    }

    /// Number of requests served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    /// Number of failed parses.
    pub fn failures(&self) -> u64 {
        self.failures.get()
    }

    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.loads() as f64 + self.failures() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let stats = LoadStats::default();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.record_load();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(stats.failures(), 0);
    }
}
