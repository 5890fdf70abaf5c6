//! Default values and constants for all configuration settings.
//!
//! Contains the `DEFAULT_*` constants not owned by an engine module, and
//! the `ConfigFile::default()` implementation.

use std::path::PathBuf;
use std::time::Duration;

use super::file::config_directory;
use super::settings::*;
use crate::blocks::{SizeBand, DEFAULT_MAX_BLOCK_AREA_M2, DEFAULT_MIN_BLOCK_AREA_M2};
use crate::fill::{FailSafe, FillConfig, DEFAULT_BATCH_SIZE};
use crate::geometry::DEFAULT_BUFFER_RADIUS_M;
use crate::oracle::{
    OracleConfig, DEFAULT_EXCLUDED_HIGHWAYS, DEFAULT_ORACLE_TIMEOUT_SECS, DEFAULT_ORACLE_URL,
};

/// Default per-call oracle deadline (0 = none).
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 0;

/// Default explored area file name inside the config directory.
pub const DEFAULT_AREA_FILE_NAME: &str = "explored.geojson";

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";

/// Default explored area file (~/.wayfog/explored.geojson).
pub fn default_area_file() -> PathBuf {
    config_directory().join(DEFAULT_AREA_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            buffer: BufferSettings {
                radius_meters: DEFAULT_BUFFER_RADIUS_M,
            },
            fill: FillSettings {
                min_block_area: DEFAULT_MIN_BLOCK_AREA_M2,
                max_block_area: DEFAULT_MAX_BLOCK_AREA_M2,
                batch_size: DEFAULT_BATCH_SIZE,
                on_oracle_failure: FailSafe::default(),
                call_timeout: DEFAULT_CALL_TIMEOUT_SECS,
            },
            oracle: OracleSettings {
                url: DEFAULT_ORACLE_URL.to_string(),
                timeout: DEFAULT_ORACLE_TIMEOUT_SECS,
                excluded_highways: DEFAULT_EXCLUDED_HIGHWAYS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            session: SessionSettings {
                area_file: default_area_file(),
            },
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            },
        }
    }
}

impl ConfigFile {
    /// Fill engine configuration from the `[fill]` section.
    pub fn to_fill_config(&self) -> FillConfig {
        let call_timeout = match self.fill.call_timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        FillConfig::default()
            .with_size_band(SizeBand::new(
                self.fill.min_block_area,
                self.fill.max_block_area,
            ))
            .with_batch_size(self.fill.batch_size)
            .with_fail_safe(self.fill.on_oracle_failure)
            .with_call_timeout(call_timeout)
    }

    /// Street oracle configuration from the `[oracle]` section.
    pub fn to_oracle_config(&self) -> OracleConfig {
        OracleConfig {
            url: self.oracle.url.clone(),
            timeout_secs: self.oracle.timeout,
            excluded_highways: self.oracle.excluded_highways.clone(),
        }
    }
}
