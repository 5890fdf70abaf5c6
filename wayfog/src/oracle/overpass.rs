//! Overpass API street oracle.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::geometry::BoundingBox;

use super::http::AsyncHttpClient;
use super::types::{OracleError, StreetOracle};

/// Public Overpass interpreter endpoint.
pub const DEFAULT_ORACLE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Server-side query timeout and HTTP timeout, in seconds.
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 25;

/// `highway=*` classes that do not split a block into two.
pub const DEFAULT_EXCLUDED_HIGHWAYS: &[&str] = &[
    "footway",
    "cycleway",
    "path",
    "service",
    "track",
    "steps",
    "pedestrian",
];

/// Settings for an [`OverpassOracle`].
#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub excluded_highways: Vec<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ORACLE_URL.to_string(),
            timeout_secs: DEFAULT_ORACLE_TIMEOUT_SECS,
            excluded_highways: DEFAULT_EXCLUDED_HIGHWAYS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Only the field the oracle cares about; element bodies are ignored.
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<serde_json::Value>,
}

/// Street oracle backed by an Overpass API instance.
///
/// Sends one `data=<query>` POST per bounding box. The query asks for the
/// ids of every `highway` way in the box whose class is not excluded; a
/// non-empty `elements` array means the box contains a street.
pub struct OverpassOracle<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
    timeout_secs: u64,
    excluded: Vec<String>,
}

impl<C: AsyncHttpClient> OverpassOracle<C> {
    /// Creates an oracle for the public endpoint with default exclusions.
    pub fn new(http_client: C) -> Self {
        Self::with_config(http_client, &OracleConfig::default())
    }

    /// Creates an oracle from explicit settings.
    pub fn with_config(http_client: C, config: &OracleConfig) -> Self {
        Self {
            http_client,
            endpoint: config.url.clone(),
            timeout_secs: config.timeout_secs,
            excluded: config.excluded_highways.clone(),
        }
    }

    /// The interpreter URL queries are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the Overpass QL query for a box.
    ///
    /// Overpass expects the box as `(south, west, north, east)`.
    pub fn build_query(&self, bbox: &BoundingBox) -> String {
        let bounds = format!(
            "({},{},{},{})",
            bbox.south(),
            bbox.west(),
            bbox.north(),
            bbox.east()
        );

        let filter = if self.excluded.is_empty() {
            String::new()
        } else {
            format!("[\"highway\"!~\"^({})$\"]", self.excluded.join("|"))
        };

        format!(
            "[out:json][timeout:{}];way[\"highway\"]{}{};out ids;",
            self.timeout_secs, filter, bounds
        )
    }
}

impl<C: AsyncHttpClient> StreetOracle for OverpassOracle<C> {
    async fn has_streets(&self, bbox: &BoundingBox) -> Result<bool, OracleError> {
        let query = self.build_query(bbox);
        let body = self
            .http_client
            .post_form(&self.endpoint, &[("data", query.as_str())])
            .await?;

        let response: OverpassResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Overpass response was not the expected JSON");
            OracleError::InvalidResponse(e.to_string())
        })?;

        debug!(
            south = bbox.south(),
            west = bbox.west(),
            north = bbox.north(),
            east = bbox.east(),
            ways = response.elements.len(),
            "Street lookup complete"
        );

        Ok(!response.elements.is_empty())
    }
}
