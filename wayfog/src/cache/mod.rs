//! Spatial cache of street-presence answers.
//!
//! Remembers what the street oracle said for a block, keyed by the block's
//! [`SpatialKey`](crate::blocks::SpatialKey), so the same hole is never
//! looked up twice in one process. Entries never expire and the cache is
//! unbounded; it lives as long as the object the caller owns.
//!
//! The cache is an explicit object handed to the fill engine, not global
//! state, so sessions can share one instance or keep their own.

mod memory;
mod stats;
mod r#trait;

pub use memory::MemoryStreetCache;
pub use r#trait::{NoOpStreetCache, StreetCache};
pub use stats::StreetCacheStats;
