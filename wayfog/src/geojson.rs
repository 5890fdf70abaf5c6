//! GeoJSON boundary: persisted explored-area format and input normalization.
//!
//! The explored area is persisted as a single `Feature` wrapping the area
//! geometry, with export metadata in its properties:
//!
//! ```json
//! {
//!   "type": "Feature",
//!   "geometry": { "type": "MultiPolygon", "coordinates": [...] },
//!   "properties": {
//!     "exportDate": "2026-10-19T08:15:02.113Z",
//!     "appVersion": "0.3.0",
//!     "description": "Explored area"
//!   }
//! }
//! ```
//!
//! Inputs arriving from outside may be feature-wrapped or bare geometries.
//! [`parse_area`] and [`parse_path`] normalize both shapes (plus a
//! `FeatureCollection`) into the engine's explicit geometry types exactly
//! once, so nothing downstream ever sees the ambiguity.

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::geometry::{Geometry, PathGeometry};

/// Errors raised while reading or writing GeoJSON.
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// Not valid JSON, or the geometry did not match the expected shape.
    #[error("Invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A recognizable object of the wrong kind (e.g. a Point).
    #[error("Unsupported GeoJSON type '{found}', expected {expected}")]
    UnsupportedType { found: String, expected: &'static str },

    /// A Feature or FeatureCollection without a usable geometry.
    #[error("GeoJSON document contains no {0} geometry")]
    NoGeometry(&'static str),
}

/// Metadata stored alongside an exported explored area.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProperties {
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub description: String,
}

/// A GeoJSON Feature wrapping the explored-area geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: ExportProperties,
}

impl From<Feature> for Geometry {
    fn from(feature: Feature) -> Self {
        feature.geometry
    }
}

/// Wraps a geometry into the persisted export Feature.
///
/// `exportDate` is the current UTC time in ISO-8601 with millisecond
/// precision; `appVersion` is this crate's version.
pub fn export_feature(geometry: &Geometry, description: impl Into<String>) -> Feature {
    Feature {
        geometry: geometry.clone(),
        properties: ExportProperties {
            export_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            app_version: crate::VERSION.to_string(),
            description: description.into(),
        },
    }
}

/// Serializes a feature as pretty-printed JSON.
pub fn to_json_string(feature: &Feature) -> Result<String, GeoJsonError> {
    Ok(serde_json::to_string_pretty(feature)?)
}

/// Parses an explored area from a Feature, FeatureCollection or bare geometry.
///
/// For a FeatureCollection the first polygonal feature is used.
pub fn parse_area(json: &str) -> Result<Geometry, GeoJsonError> {
    let value: Value = serde_json::from_str(json)?;
    extract(value, &AREA_KIND)
}

/// Parses a line path from a Feature, FeatureCollection or bare geometry.
pub fn parse_path(json: &str) -> Result<PathGeometry, GeoJsonError> {
    let value: Value = serde_json::from_str(json)?;
    extract(value, &PATH_KIND)
}

/// Geometry types accepted for one kind of input.
struct GeometryKind {
    name: &'static str,
    types: &'static [&'static str],
}

const AREA_KIND: GeometryKind = GeometryKind {
    name: "Polygon or MultiPolygon",
    types: &["Polygon", "MultiPolygon"],
};

const PATH_KIND: GeometryKind = GeometryKind {
    name: "LineString or MultiLineString",
    types: &["LineString", "MultiLineString"],
};

fn type_of(value: &Value) -> &str {
    value.get("type").and_then(Value::as_str).unwrap_or("")
}

fn extract<T: DeserializeOwned>(value: Value, kind: &GeometryKind) -> Result<T, GeoJsonError> {
    let geometry = match type_of(&value) {
        "Feature" => feature_geometry(value).ok_or(GeoJsonError::NoGeometry(kind.name))?,
        "FeatureCollection" => collection_geometry(value, kind)?,
        _ => value,
    };

    let found = type_of(&geometry);
    if !kind.types.contains(&found) {
        return Err(GeoJsonError::UnsupportedType {
            found: found.to_string(),
            expected: kind.name,
        });
    }

    Ok(serde_json::from_value(geometry)?)
}

fn feature_geometry(mut feature: Value) -> Option<Value> {
    feature
        .get_mut("geometry")
        .map(Value::take)
        .filter(|g| !g.is_null())
}

fn collection_geometry(mut collection: Value, kind: &GeometryKind) -> Result<Value, GeoJsonError> {
    let features = match collection.get_mut("features").map(Value::take) {
        Some(Value::Array(features)) => features,
        _ => return Err(GeoJsonError::NoGeometry(kind.name)),
    };

    features
        .into_iter()
        .filter_map(feature_geometry)
        .find(|geometry| kind.types.contains(&type_of(geometry)))
        .ok_or(GeoJsonError::NoGeometry(kind.name))
}
