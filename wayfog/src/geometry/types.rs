//! Geometry type definitions

use serde::{Deserialize, Serialize};

use super::error::GeometryError;

/// A `(longitude, latitude)` coordinate pair in decimal degrees.
pub type Position = [f64; 2];

/// A closed ring of positions. The first and last position are equal.
pub type Ring = Vec<Position>;

/// Minimum number of positions in a closed ring (a triangle plus closure).
pub const MIN_RING_POSITIONS: usize = 4;

/// Polygonal geometry of the explored area.
///
/// Each polygon is a list of rings: ring 0 is the outer boundary and
/// rings 1.. are holes, following the GeoJSON convention. The serde
/// representation is the GeoJSON geometry object, e.g.
/// `{"type": "Polygon", "coordinates": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

impl Geometry {
    /// Builds a geometry from a list of polygons.
    ///
    /// The kind is chosen by component count: one polygon yields a
    /// `Polygon`, more yield a `MultiPolygon`. Returns `None` when empty.
    pub fn from_polygons(mut polygons: Vec<Vec<Ring>>) -> Option<Self> {
        match polygons.len() {
            0 => None,
            1 => polygons.pop().map(|coordinates| Geometry::Polygon { coordinates }),
            _ => Some(Geometry::MultiPolygon {
                coordinates: polygons,
            }),
        }
    }

    /// Iterates the constituent polygons in order.
    pub fn polygons(&self) -> std::slice::Iter<'_, Vec<Ring>> {
        match self {
            Geometry::Polygon { coordinates } => std::slice::from_ref(coordinates).iter(),
            Geometry::MultiPolygon { coordinates } => coordinates.iter(),
        }
    }

    /// Number of constituent polygons.
    pub fn polygon_count(&self) -> usize {
        match self {
            Geometry::Polygon { .. } => 1,
            Geometry::MultiPolygon { coordinates } => coordinates.len(),
        }
    }

    /// Total number of interior rings across all polygons.
    pub fn hole_count(&self) -> usize {
        self.polygons()
            .map(|rings| rings.len().saturating_sub(1))
            .sum()
    }

    /// Returns true for a `MultiPolygon`.
    pub fn is_multi(&self) -> bool {
        matches!(self, Geometry::MultiPolygon { .. })
    }

    /// Checks the structural invariants of every ring.
    ///
    /// Each ring needs at least [`MIN_RING_POSITIONS`] finite positions and
    /// must be closed. Every polygon needs an outer ring.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.polygon_count() == 0 {
            return Err(GeometryError::InvalidGeometry(
                "multipolygon has no polygons".to_string(),
            ));
        }

        for (polygon_index, rings) in self.polygons().enumerate() {
            if rings.is_empty() {
                return Err(GeometryError::InvalidGeometry(format!(
                    "polygon {} has no outer ring",
                    polygon_index
                )));
            }
            for (ring_index, ring) in rings.iter().enumerate() {
                validate_ring(ring).map_err(|reason| {
                    GeometryError::InvalidGeometry(format!(
                        "polygon {} ring {}: {}",
                        polygon_index, ring_index, reason
                    ))
                })?;
            }
        }

        Ok(())
    }
}

fn validate_ring(ring: &[Position]) -> Result<(), String> {
    if ring.len() < MIN_RING_POSITIONS {
        return Err(format!(
            "{} positions, at least {} required",
            ring.len(),
            MIN_RING_POSITIONS
        ));
    }
    if ring.iter().any(|p| !p[0].is_finite() || !p[1].is_finite()) {
        return Err("non-finite coordinate".to_string());
    }
    if ring.first() != ring.last() {
        return Err("ring is not closed".to_string());
    }
    Ok(())
}

/// Line input for the buffer: one path or several disjoint paths.
///
/// Serialized as the GeoJSON `LineString` / `MultiLineString` geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathGeometry {
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
}

impl PathGeometry {
    /// Creates a single-path geometry.
    pub fn line(coordinates: Vec<Position>) -> Self {
        PathGeometry::LineString { coordinates }
    }

    /// Iterates the individual paths.
    pub fn lines(&self) -> std::slice::Iter<'_, Vec<Position>> {
        match self {
            PathGeometry::LineString { coordinates } => std::slice::from_ref(coordinates).iter(),
            PathGeometry::MultiLineString { coordinates } => coordinates.iter(),
        }
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Bounding box of a set of positions, `None` if empty.
    pub fn of_positions(positions: &[Position]) -> Option<Self> {
        let first = positions.first()?;
        let init = BoundingBox {
            min_lon: first[0],
            min_lat: first[1],
            max_lon: first[0],
            max_lat: first[1],
        };
        Some(positions.iter().fold(init, |bbox, p| BoundingBox {
            min_lon: bbox.min_lon.min(p[0]),
            min_lat: bbox.min_lat.min(p[1]),
            max_lon: bbox.max_lon.max(p[0]),
            max_lat: bbox.max_lat.max(p[1]),
        }))
    }

    /// Southern edge (minimum latitude).
    pub fn south(&self) -> f64 {
        self.min_lat
    }

    /// Western edge (minimum longitude).
    pub fn west(&self) -> f64 {
        self.min_lon
    }

    /// Northern edge (maximum latitude).
    pub fn north(&self) -> f64 {
        self.max_lat
    }

    /// Eastern edge (maximum longitude).
    pub fn east(&self) -> f64 {
        self.max_lon
    }
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
    fn test_from_polygons_picks_kind_by_count() {
        assert!(Geometry::from_polygons(vec![]).is_none());

        let single = Geometry::from_polygons(vec![vec![square(0.0, 0.0, 1.0)]]).unwrap();
        assert!(!single.is_multi());

        let multi = Geometry::from_polygons(vec![
            vec![square(0.0, 0.0, 1.0)],
            vec![square(5.0, 5.0, 1.0)],
        ])
        .unwrap();
        assert!(multi.is_multi());
        assert_eq!(multi.polygon_count(), 2);
    }

    #[test]
    fn test_hole_count() {
        let geometry = Geometry::MultiPolygon {
            coordinates: vec![
                vec![square(0.0, 0.0, 10.0), square(1.0, 1.0, 1.0)],
                vec![
                    square(20.0, 0.0, 10.0),
                    square(21.0, 1.0, 1.0),
                    square(23.0, 1.0, 1.0),
                ],
            ],
        };
        assert_eq!(geometry.hole_count(), 3);
    }

    #[test]
    fn test_validate_rejects_open_ring() {
        let mut ring = square(0.0, 0.0, 1.0);
        ring.pop();
        ring.push([0.5, 0.5]);
        let geometry = Geometry::Polygon {
            coordinates: vec![ring],
        };
        let err = geometry.validate().unwrap_err();
        assert!(err.to_string().contains("not closed"));
    }

    #[test]
    fn test_validate_rejects_short_ring() {
        let geometry = Geometry::Polygon {
            coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]],
        };
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut ring = square(0.0, 0.0, 1.0);
        ring[2] = [f64::NAN, 1.0];
        let geometry = Geometry::Polygon {
            coordinates: vec![ring],
        };
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_geometry_serde_shape() {
        let geometry = Geometry::Polygon {
            coordinates: vec![square(0.0, 0.0, 1.0)],
        };
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["type"], "Polygon");
        assert_eq!(json["coordinates"][0][1][0], 1.0);
    }

    #[test]
    fn test_bounding_box_edges() {
        let bbox = BoundingBox::of_positions(&square(2.0, 48.0, 0.5)).unwrap();
        assert_eq!(bbox.south(), 48.0);
        assert_eq!(bbox.west(), 2.0);
        assert_eq!(bbox.north(), 48.5);
        assert_eq!(bbox.east(), 2.5);
        assert!(BoundingBox::of_positions(&[]).is_none());
    }
}
