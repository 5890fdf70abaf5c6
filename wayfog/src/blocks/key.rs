//! Spatial signature used to memoize street lookups.

use std::fmt;

use crate::geometry::Position;

/// Cache key derived from a block's centroid and area.
///
/// Latitude and longitude are rounded to 5 decimal places (about one meter)
/// and the area to the nearest square meter. Two different blocks can share
/// a key; the key is only a memoization hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpatialKey(String);

impl SpatialKey {
    /// Builds the key from a `(longitude, latitude)` centroid and an area in m².
    pub fn new(centroid: Position, area_m2: f64) -> Self {
        Self(format!(
            "{:.5},{:.5},{}",
            centroid[1],
            centroid[0],
            area_m2.round() as i64
        ))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpatialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_format_is_lat_lon_area() {
        let key = SpatialKey::new([2.3522219, 48.856614], 1234.56);
        assert_eq!(key.as_str(), "48.85661,2.35222,1235");
    }

    #[test]
    fn test_sub_meter_jitter_maps_to_same_key() {
        let a = SpatialKey::new([2.352221, 48.856611], 1000.2);
        let b = SpatialKey::new([2.352222, 48.856612], 999.9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_area_gives_different_key() {
        let a = SpatialKey::new([2.35222, 48.85661], 1000.0);
        let b = SpatialKey::new([2.35222, 48.85661], 1002.0);
        assert_ne!(a, b);
    }

    proptest! {
        /// Property: the key is a pure function of the rounded inputs.
        #[test]
        fn prop_key_matches_rounded_inputs(
            lon in -180.0f64..180.0f64,
            lat in -85.0f64..85.0f64,
            area in 0.0f64..10_000_000.0f64,
        ) {
            let key = SpatialKey::new([lon, lat], area);
            let expected = format!("{:.5},{:.5},{}", lat, lon, area.round() as i64);
            prop_assert_eq!(key.as_str(), expected.as_str());
            prop_assert_eq!(key, SpatialKey::new([lon, lat], area));
        }
    }
}
