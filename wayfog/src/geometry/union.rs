//! Polygon union of the explored area with new coverage.

use geo::BooleanOps;
use tracing::{debug, warn};

use super::convert::{from_multi_polygon, to_multi_polygon};
use super::error::{contain_panic, GeometryError};
use super::types::Geometry;

/// Merges `addition` into `existing`.
///
/// - With no existing area the addition is returned unchanged.
/// - On a topology failure the existing area is returned unchanged and the
///   failure is logged; exploration progress is never lost to a merge error.
///
/// The result kind follows connectivity: overlapping inputs merge into a
/// `Polygon`, disjoint ones stay a `MultiPolygon`.
///
/// `addition` accepts a bare [`Geometry`] or a feature-wrapped one
/// ([`Feature`](crate::geojson::Feature)), normalized here.
pub fn union(existing: Option<Geometry>, addition: impl Into<Geometry>) -> Geometry {
    let addition = addition.into();

    let Some(existing) = existing else {
        return addition;
    };

    match try_union(&existing, &addition) {
        Ok(merged) => merged,
        Err(e) => {
            warn!(error = %e, "Union failed, keeping existing explored area");
            existing
        }
    }
}

/// Computes the set union of two geometries.
///
/// # Errors
///
/// [`GeometryError::MergeFailure`] when either input is structurally
/// invalid, when the boolean-ops backend panics, or when the result is empty.
pub fn try_union(a: &Geometry, b: &Geometry) -> Result<Geometry, GeometryError> {
    a.validate()
        .and_then(|_| b.validate())
        .map_err(|e| GeometryError::MergeFailure(e.to_string()))?;

    let left = to_multi_polygon(a);
    let right = to_multi_polygon(b);

    let merged = contain_panic("boolean union", || left.union(&right))
        .map_err(GeometryError::MergeFailure)?;

    debug!(
        left_polygons = left.0.len(),
        right_polygons = right.0.len(),
        merged_polygons = merged.0.len(),
        "Merged geometries"
    );

    from_multi_polygon(&merged)
        .ok_or_else(|| GeometryError::MergeFailure("union produced an empty geometry".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::convert::area_m2;
    use crate::geometry::types::Ring;

    fn square(x: f64, y: f64, size: f64) -> Ring {
        vec![
            [x, y],
            [x + size, y],
            [x + size, y + size],
            [x, y + size],
            [x, y],
        ]
    }

    fn polygon(ring: Ring) -> Geometry {
        Geometry::Polygon {
            coordinates: vec![ring],
        }
    }

    #[test]
    fn test_union_with_nothing_returns_addition() {
        let a = polygon(square(0.0, 0.0, 0.01));
        assert_eq!(union(None, a.clone()), a);
    }

    #[test]
    fn test_union_is_idempotent_in_area() {
        let a = polygon(square(0.0, 0.0, 0.01));
        let merged = union(Some(a.clone()), a.clone());
        let (before, after) = (area_m2(&a), area_m2(&merged));
        assert!((before - after).abs() / before < 1e-6);
    }

    #[test]
    fn test_disjoint_union_is_multipolygon() {
        let a = polygon(square(0.0, 0.0, 0.01));
        let b = polygon(square(1.0, 1.0, 0.01));
        let merged = union(Some(a), b);
        assert!(merged.is_multi());
        assert_eq!(merged.polygon_count(), 2);
    }

    #[test]
    fn test_overlapping_union_is_polygon() {
        let a = polygon(square(0.0, 0.0, 0.01));
        let b = polygon(square(0.005, 0.0, 0.01));
        let merged = union(Some(a.clone()), b);
        assert!(!merged.is_multi());
        assert!(area_m2(&merged) > area_m2(&a));
    }

    #[test]
    fn test_union_bridges_multipolygon_into_polygon() {
        let parts = Geometry::MultiPolygon {
            coordinates: vec![vec![square(0.0, 0.0, 0.01)], vec![square(0.02, 0.0, 0.01)]],
        };
        let bridge = polygon(square(0.005, 0.0, 0.02));
        let merged = union(Some(parts), bridge);
        assert!(!merged.is_multi());
    }

    #[test]
    fn test_union_keeps_existing_on_invalid_input() {
        let existing = polygon(square(0.0, 0.0, 0.01));
        let broken = Geometry::Polygon {
            coordinates: vec![vec![[0.0, 0.0], [f64::NAN, 1.0], [0.0, 0.0]]],
        };
        assert_eq!(union(Some(existing.clone()), broken), existing);
    }

    #[test]
    fn test_try_union_reports_merge_failure() {
        let existing = polygon(square(0.0, 0.0, 0.01));
        let broken = Geometry::Polygon {
            coordinates: vec![vec![[0.0, 0.0], [1.0, 1.0]]],
        };
        assert!(matches!(
            try_union(&existing, &broken),
            Err(GeometryError::MergeFailure(_))
        ));
    }
}
