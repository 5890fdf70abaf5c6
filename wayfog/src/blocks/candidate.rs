//! Ring extraction and size filtering of enclosed holes.

use crate::geometry::convert::{ring_area_m2, ring_centroid};
use crate::geometry::{BoundingBox, Ring};

use super::key::SpatialKey;

/// Default lower bound (exclusive) for a fillable block, in m².
pub const DEFAULT_MIN_BLOCK_AREA_M2: f64 = 50.0;

/// Default upper bound (exclusive) for a fillable block, in m².
pub const DEFAULT_MAX_BLOCK_AREA_M2: f64 = 5_000_000.0;

/// Open interval of hole areas eligible for a street check.
///
/// Holes at or below `min_m2` are too small to matter; holes at or above
/// `max_m2` are too large to safely treat as one empty block. Both are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBand {
    pub min_m2: f64,
    pub max_m2: f64,
}

impl SizeBand {
    /// Creates a band with explicit bounds.
    pub fn new(min_m2: f64, max_m2: f64) -> Self {
        Self { min_m2, max_m2 }
    }

    /// Returns true if `area_m2` lies strictly inside the band.
    pub fn contains(&self, area_m2: f64) -> bool {
        area_m2 > self.min_m2 && area_m2 < self.max_m2
    }
}

impl Default for SizeBand {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_BLOCK_AREA_M2, DEFAULT_MAX_BLOCK_AREA_M2)
    }
}

/// An enclosed hole eligible for a street check.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCandidate {
    /// Index of the ring within its polygon (1.. for holes).
    pub ring_index: usize,
    /// The hole's ring, verbatim.
    pub ring: Ring,
    /// Geodesic area in square meters.
    pub area_m2: f64,
    pub bbox: BoundingBox,
    pub key: SpatialKey,
}

impl BlockCandidate {
    /// Measures a hole ring. Returns `None` for rings without extent.
    pub fn from_ring(ring_index: usize, ring: &Ring) -> Option<Self> {
        let bbox = BoundingBox::of_positions(ring)?;
        let centroid = ring_centroid(ring)?;
        let area_m2 = ring_area_m2(ring);
        Some(Self {
            ring_index,
            ring: ring.clone(),
            area_m2,
            bbox,
            key: SpatialKey::new(centroid, area_m2),
        })
    }
}

/// The rings of one polygon, split by what must happen to them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoleSplit {
    /// Ring 0, preserved verbatim. `None` only for an empty ring list.
    pub outer: Option<Ring>,
    /// Holes outside the size band, kept without any street check.
    pub retained: Vec<Ring>,
    /// Holes inside the size band, in original order.
    pub eligible: Vec<BlockCandidate>,
}

/// Splits a polygon's rings into outer boundary, retained and eligible holes.
pub fn split_holes(rings: &[Ring], band: &SizeBand) -> HoleSplit {
    let mut split = HoleSplit {
        outer: rings.first().cloned(),
        ..HoleSplit::default()
    };

    for (index, ring) in rings.iter().enumerate().skip(1) {
        match BlockCandidate::from_ring(index, ring) {
            Some(candidate) if band.contains(candidate.area_m2) => {
                split.eligible.push(candidate);
            }
            _ => split.retained.push(ring.clone()),
        }
    }

    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // At the equator 0.0001° ≈ 11.13 m, so a square of side `s` degrees has
    // an area of about (s * 111_320)² m².
    fn square(x: f64, y: f64, size: f64) -> Ring {
        vec![
            [x, y],
            [x + size, y],
            [x + size, y + size],
            [x, y + size],
            [x, y],
        ]
    }

    #[test]
    fn test_band_is_exclusive() {
        let band = SizeBand::default();
        assert!(!band.contains(50.0));
        assert!(band.contains(50.1));
        assert!(band.contains(4_999_999.0));
        assert!(!band.contains(5_000_000.0));
    }

    #[test]
    fn test_split_preserves_outer_and_classifies_holes() {
        let outer = square(0.0, 0.0, 0.1);
        let tiny = square(0.001, 0.001, 0.00002); // ~5 m²
        let block = square(0.01, 0.01, 0.0003); // ~1,100 m²
        let huge = square(0.05, 0.05, 0.04); // ~20 km²
        let rings = vec![outer.clone(), tiny.clone(), block.clone(), huge.clone()];

        let split = split_holes(&rings, &SizeBand::default());

        assert_eq!(split.outer, Some(outer));
        assert_eq!(split.retained, vec![tiny, huge]);
        assert_eq!(split.eligible.len(), 1);
        assert_eq!(split.eligible[0].ring, block);
        assert_eq!(split.eligible[0].ring_index, 2);
    }

    #[test]
    fn test_candidate_measurements() {
        let candidate = BlockCandidate::from_ring(1, &square(0.01, 0.02, 0.0003)).unwrap();
        assert!(candidate.area_m2 > 1_000.0 && candidate.area_m2 < 1_250.0);
        assert_eq!(candidate.bbox.south(), 0.02);
        assert_eq!(candidate.bbox.west(), 0.01);
        assert!(candidate.key.as_str().starts_with("0.02015,0.01015,"));
    }

    #[test]
    fn test_polygon_without_holes() {
        let split = split_holes(&[square(0.0, 0.0, 0.01)], &SizeBand::default());
        assert!(split.outer.is_some());
        assert!(split.retained.is_empty());
        assert!(split.eligible.is_empty());
    }

    #[test]
    fn test_empty_ring_list() {
        let split = split_holes(&[], &SizeBand::default());
        assert_eq!(split, HoleSplit::default());
    }

    proptest! {
        /// Property: every hole lands in exactly one group, eligible holes lie
        /// strictly inside the band and both groups keep original order.
        #[test]
        fn prop_split_partitions_holes(
            sizes in prop::collection::vec(0.00001f64..0.05f64, 0..12),
        ) {
            let mut rings = vec![square(-1.0, -1.0, 2.0)];
            rings.extend(
                sizes
                    .iter()
                    .enumerate()
                    .map(|(i, size)| square(-0.9 + i as f64 * 0.06, 0.0, *size)),
            );
            let band = SizeBand::default();

            let split = split_holes(&rings, &band);

            prop_assert_eq!(split.outer.as_ref(), rings.first());
            prop_assert_eq!(split.retained.len() + split.eligible.len(), sizes.len());
            for candidate in &split.eligible {
                prop_assert!(band.contains(candidate.area_m2));
            }
            prop_assert!(split
                .eligible
                .windows(2)
                .all(|w| w[0].ring_index < w[1].ring_index));
            for ring in &split.retained {
                let area = ring_area_m2(ring);
                prop_assert!(!band.contains(area));
            }
        }
    }
}
