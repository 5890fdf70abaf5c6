//! Street cache statistics.

/// Counters for monitoring how much oracle traffic the cache saves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreetCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl StreetCacheStats {
    /// Hit rate in 0.0..=1.0, 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
