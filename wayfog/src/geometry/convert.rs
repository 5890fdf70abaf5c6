//! Conversions between wayfog geometry and `geo` types, plus measurements.
//!
//! Areas are geodesic (square meters on the WGS84 sphere approximation used
//! by Chamberlain-Duquette), centroids are planar in degree space.

use geo::{Centroid, ChamberlainDuquetteArea, Coord, LineString, MultiPolygon, Polygon};

use super::types::{Geometry, Position, Ring};

/// Converts a ring into a `geo` line string.
pub fn ring_to_line_string(ring: &[Position]) -> LineString<f64> {
    ring.iter().map(|p| Coord { x: p[0], y: p[1] }).collect()
}

/// Converts a `geo` line string back into a ring.
pub fn line_string_to_ring(line: &LineString<f64>) -> Ring {
    line.coords().map(|c| [c.x, c.y]).collect()
}

/// Builds a `geo` polygon from GeoJSON-ordered rings.
pub fn rings_to_polygon(rings: &[Ring]) -> Polygon<f64> {
    let mut iter = rings.iter();
    let exterior = iter
        .next()
        .map(|ring| ring_to_line_string(ring))
        .unwrap_or_else(|| LineString::new(Vec::new()));
    let interiors = iter.map(|ring| ring_to_line_string(ring)).collect();
    Polygon::new(exterior, interiors)
}

/// Converts a `geo` polygon into GeoJSON-ordered rings.
pub fn polygon_to_rings(polygon: &Polygon<f64>) -> Vec<Ring> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(line_string_to_ring)
        .collect()
}

/// Converts any geometry into a `geo` multipolygon.
pub fn to_multi_polygon(geometry: &Geometry) -> MultiPolygon<f64> {
    MultiPolygon::new(geometry.polygons().map(|rings| rings_to_polygon(rings)).collect())
}

/// Converts a `geo` multipolygon back, dropping empty components.
///
/// Returns `None` when nothing remains.
pub fn from_multi_polygon(multi: &MultiPolygon<f64>) -> Option<Geometry> {
    let polygons = multi
        .iter()
        .filter(|polygon| !polygon.exterior().0.is_empty())
        .map(polygon_to_rings)
        .collect();
    Geometry::from_polygons(polygons)
}

/// Geodesic area of a single ring in square meters.
pub fn ring_area_m2(ring: &[Position]) -> f64 {
    Polygon::new(ring_to_line_string(ring), Vec::new()).chamberlain_duquette_unsigned_area()
}

/// Geodesic area of a geometry (holes subtracted) in square meters.
pub fn area_m2(geometry: &Geometry) -> f64 {
    to_multi_polygon(geometry).chamberlain_duquette_unsigned_area()
}

/// Planar centroid of a ring as `(longitude, latitude)`.
pub fn ring_centroid(ring: &[Position]) -> Option<Position> {
    Polygon::new(ring_to_line_string(ring), Vec::new())
        .centroid()
        .map(|point| [point.x(), point.y()])
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_ring_area_near_equator() {
        // 0.001° ≈ 111.3 m at the equator
        let area = ring_area_m2(&square(0.0, 0.0, 0.001));
        assert!((area - 12_392.0).abs() < 150.0, "area was {}", area);
    }

    #[test]
    fn test_area_subtracts_holes() {
        let solid = Geometry::Polygon {
            coordinates: vec![square(0.0, 0.0, 0.01)],
        };
        let holed = Geometry::Polygon {
            coordinates: vec![square(0.0, 0.0, 0.01), square(0.004, 0.004, 0.002)],
        };
        let hole_area = ring_area_m2(&square(0.004, 0.004, 0.002));
        let diff = area_m2(&solid) - area_m2(&holed);
        assert!((diff - hole_area).abs() < 1.0);
    }

    #[test]
    fn test_ring_centroid() {
        let centroid = ring_centroid(&square(10.0, 20.0, 2.0)).unwrap();
        assert!((centroid[0] - 11.0).abs() < 1e-9);
        assert!((centroid[1] - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_conversion_keeps_ring_order() {
        let rings = vec![square(0.0, 0.0, 10.0), square(1.0, 1.0, 1.0), square(5.0, 5.0, 1.0)];
        let polygon = rings_to_polygon(&rings);
        assert_eq!(polygon.interiors().len(), 2);
        assert_eq!(polygon_to_rings(&polygon), rings);
    }

    #[test]
    fn test_from_empty_multi_polygon() {
        assert!(from_multi_polygon(&MultiPolygon::new(Vec::new())).is_none());
    }
}
