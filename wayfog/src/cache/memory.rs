//! In-memory street cache.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::trace;

use crate::blocks::SpatialKey;

use super::{StreetCache, StreetCacheStats};

/// Process-scoped street cache with no expiry and no size bound.
///
/// Backed by a concurrent map so batch members can record answers while
/// other lookups are in progress.
#[derive(Debug, Default)]
pub struct MemoryStreetCache {
    entries: DashMap<SpatialKey, bool>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryStreetCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every remembered answer. Counters are kept.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl StreetCache for MemoryStreetCache {
    fn get(&self, key: &SpatialKey) -> Option<bool> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(key = %key, has_streets = *entry, "Street cache hit");
                Some(*entry)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn set(&self, key: SpatialKey, has_streets: bool) {
        self.entries.insert(key, has_streets);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> StreetCacheStats {
        StreetCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key(area: f64) -> SpatialKey {
        SpatialKey::new([2.35, 48.85], area)
    }

    #[test]
    fn test_get_miss_then_hit() {
        let cache = MemoryStreetCache::new();
        assert_eq!(cache.get(&key(1000.0)), None);

        cache.set(key(1000.0), false);
        assert_eq!(cache.get(&key(1000.0)), Some(false));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = MemoryStreetCache::new();
        cache.set(key(1000.0), true);
        cache.set(key(2000.0), false);
        assert_eq!(cache.get(&key(1000.0)), Some(true));
        assert_eq!(cache.get(&key(2000.0)), Some(false));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear_keeps_counters() {
        let cache = MemoryStreetCache::new();
        cache.set(key(1000.0), true);
        cache.get(&key(1000.0));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&key(1000.0)), None);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = Arc::new(MemoryStreetCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.set(key(1000.0 + i as f64 * 10.0), i % 2 == 0))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
    }
}
