//! Block extraction: enclosed holes of the explored area.
//!
//! A polygon's ring 0 is its outer boundary and always survives untouched.
//! Every further ring is a hole (an unexplored "block"). Holes are measured
//! and split by a [`SizeBand`]: only holes strictly inside the band are
//! candidates for a street check, everything else is kept as-is.

mod candidate;
mod key;

pub use candidate::{
    split_holes, BlockCandidate, HoleSplit, SizeBand, DEFAULT_MAX_BLOCK_AREA_M2,
    DEFAULT_MIN_BLOCK_AREA_M2,
};
pub use key::SpatialKey;
