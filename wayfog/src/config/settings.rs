//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::fill::FailSafe;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Path corridor settings
    pub buffer: BufferSettings,
    /// Fill decision settings
    pub fill: FillSettings,
    /// Street oracle settings
    pub oracle: OracleSettings,
    /// Explored area persistence
    pub session: SessionSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Path corridor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSettings {
    /// Corridor radius in meters
    pub radius_meters: f64,
}

/// Fill decision configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FillSettings {
    /// Smallest fillable block, exclusive (m²)
    pub min_block_area: f64,
    /// Largest fillable block, exclusive (m²)
    pub max_block_area: f64,
    /// Concurrent oracle calls per batch
    pub batch_size: usize,
    /// Decision for blocks whose lookup failed
    pub on_oracle_failure: FailSafe,
    /// Per-call deadline in seconds, 0 = none
    pub call_timeout: u64,
}

/// Street oracle configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSettings {
    /// Overpass interpreter URL
    pub url: String,
    /// HTTP and server-side query timeout in seconds
    pub timeout: u64,
    /// Highway classes that do not split a block
    pub excluded_highways: Vec<String>,
}

/// Explored area persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// GeoJSON file holding the explored area
    pub area_file: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for log files
    pub directory: PathBuf,
}
