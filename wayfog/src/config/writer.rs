//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[buffer]
; Corridor radius around a walked path, in meters (default: 15)
radius_meters = {}

[fill]
; Enclosed holes are candidates for filling only when their area lies
; strictly between these bounds (square meters). Smaller holes are noise,
; larger ones are too big to treat as a single block. Both are always kept.
min_block_area = {}
max_block_area = {}
; Street lookups issued concurrently per batch (default: 3)
; Batches run one after another to respect the oracle's rate limit
batch_size = {}
; What to do with a block when its street lookup fails:
;   fill - assume no streets and fill the block (default)
;   keep - assume streets and keep the hole
on_oracle_failure = {}
; Deadline for a single street lookup in seconds, 0 = none (default: 0)
call_timeout = {}

[oracle]
; Overpass API interpreter endpoint
url = {}
; HTTP and query timeout in seconds (default: 25)
timeout = {}
; Comma-separated highway classes that do not split a block
excluded_highways = {}

[session]
; GeoJSON file holding the explored area
area_file = {}

[logging]
; Directory for log files
directory = {}
"#,
        config.buffer.radius_meters,
        config.fill.min_block_area,
        config.fill.max_block_area,
        config.fill.batch_size,
        config.fill.on_oracle_failure.as_str(),
        config.fill.call_timeout,
        config.oracle.url,
        config.oracle.timeout,
        config.oracle.excluded_highways.join(","),
        path_to_string(&config.session.area_file),
        path_to_string(&config.logging.directory),
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::FailSafe;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_loads_back() {
        let mut config = ConfigFile::default();
        config.buffer.radius_meters = 22.5;
        config.fill.batch_size = 4;
        config.fill.on_oracle_failure = FailSafe::AssumeStreets;
        config.oracle.excluded_highways = vec!["footway".to_string(), "steps".to_string()];

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        config.save_to(&path).unwrap();

        assert_eq!(ConfigFile::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_default_config_string_is_commented() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("[fill]"));
        assert!(content.contains("on_oracle_failure = fill"));
        assert!(content.contains("excluded_highways = footway,cycleway,path,service,track,steps,pedestrian"));
        assert!(content.contains("; Overpass API interpreter endpoint"));
    }
}
