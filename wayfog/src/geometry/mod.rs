//! Geometry leaves of the engine.
//!
//! Provides the explored-area data model and the two pure operations the
//! rest of the engine builds on:
//!
//! - [`buffer_path`] - path → corridor polygon of a fixed radius
//! - [`union`] - existing area + new coverage → merged area (fails soft)
//!
//! Coordinates are `(longitude, latitude)` in degrees. Measurements in
//! [`convert`] return square meters.

pub mod convert;

mod buffer;
mod error;
mod types;
mod union;

pub use buffer::{buffer_path, DEFAULT_BUFFER_RADIUS_M};
pub use convert::area_m2;
pub use error::GeometryError;
pub use types::{BoundingBox, Geometry, PathGeometry, Position, Ring, MIN_RING_POSITIONS};
pub use union::{try_union, union};
