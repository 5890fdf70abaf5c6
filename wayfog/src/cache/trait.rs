//! Street cache trait definition for dependency injection.

use crate::blocks::SpatialKey;

use super::StreetCacheStats;

/// Cache abstraction for street-presence answers.
///
/// Reads may interleave freely with writes. A key is written once its
/// oracle answer is known; later writes for the same key overwrite it.
///
/// # Example
///
/// ```
/// use wayfog::blocks::SpatialKey;
/// use wayfog::cache::{MemoryStreetCache, StreetCache};
///
/// fn lookup(cache: &dyn StreetCache, key: &SpatialKey) -> Option<bool> {
///     cache.get(key)
/// }
///
/// let cache = MemoryStreetCache::new();
/// let key = SpatialKey::new([2.35, 48.85], 1200.0);
/// assert_eq!(lookup(&cache, &key), None);
///
/// cache.set(key.clone(), true);
/// assert_eq!(lookup(&cache, &key), Some(true));
/// ```
pub trait StreetCache: Send + Sync {
    /// Returns the remembered answer, `None` on a miss.
    fn get(&self, key: &SpatialKey) -> Option<bool>;

    /// Remembers an answer.
    fn set(&self, key: SpatialKey, has_streets: bool);

    /// Number of remembered keys.
    fn len(&self) -> usize;

    /// Returns true when nothing is remembered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters since creation.
    fn stats(&self) -> StreetCacheStats;
}

/// Cache that never remembers anything.
///
/// Every lookup misses, so every eligible block reaches the oracle. Useful
/// for tests and for measuring the oracle's raw cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStreetCache;

impl StreetCache for NoOpStreetCache {
    fn get(&self, _key: &SpatialKey) -> Option<bool> {
        None // Always miss
    }

    fn set(&self, _key: SpatialKey, _has_streets: bool) {}

    fn len(&self) -> usize {
        0
    }

    fn stats(&self) -> StreetCacheStats {
        StreetCacheStats::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key() -> SpatialKey {
        SpatialKey::new([2.35, 48.85], 1200.0)
    }

    #[test]
    fn test_noop_cache_always_misses() {
        let cache = NoOpStreetCache;
        cache.set(key(), true);
        assert_eq!(cache.get(&key()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_noop_cache_as_trait_object() {
        let cache: Arc<dyn StreetCache> = Arc::new(NoOpStreetCache);
        cache.set(key(), false);
        assert_eq!(cache.get(&key()), None);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoOpStreetCache>();
    }
}
