//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::fill::FailSafe;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [buffer] section
    if let Some(section) = ini.section(Some("buffer")) {
        if let Some(v) = section.get("radius_meters") {
            config.buffer.radius_meters = parse_positive_f64("buffer", "radius_meters", v)?;
        }
    }

    // [fill] section
    if let Some(section) = ini.section(Some("fill")) {
        if let Some(v) = section.get("min_block_area") {
            config.fill.min_block_area = parse_area("min_block_area", v)?;
        }
        if let Some(v) = section.get("max_block_area") {
            config.fill.max_block_area = parse_area("max_block_area", v)?;
        }
        if config.fill.min_block_area >= config.fill.max_block_area {
            return Err(invalid(
                "fill",
                "max_block_area",
                &config.fill.max_block_area.to_string(),
                "must be greater than min_block_area",
            ));
        }
        if let Some(v) = section.get("batch_size") {
            let batch_size: usize = parse_number("fill", "batch_size", v, "must be an integer >= 1")?;
            if batch_size == 0 {
                return Err(invalid("fill", "batch_size", v, "must be an integer >= 1"));
            }
            config.fill.batch_size = batch_size;
        }
        if let Some(v) = section.get("on_oracle_failure") {
            config.fill.on_oracle_failure = FailSafe::parse(v)
                .ok_or_else(|| invalid("fill", "on_oracle_failure", v, "must be 'fill' or 'keep'"))?;
        }
        if let Some(v) = section.get("call_timeout") {
            config.fill.call_timeout = parse_number(
                "fill",
                "call_timeout",
                v,
                "must be a non-negative integer (seconds, 0 = none)",
            )?;
        }
    }

    // [oracle] section
    if let Some(section) = ini.section(Some("oracle")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(invalid("oracle", "url", v, "must be an http(s) URL"));
            }
            config.oracle.url = v.to_string();
        }
        if let Some(v) = section.get("timeout") {
            let timeout: u64 =
                parse_number("oracle", "timeout", v, "must be a positive integer (seconds)")?;
            if timeout == 0 {
                return Err(invalid(
                    "oracle",
                    "timeout",
                    v,
                    "must be a positive integer (seconds)",
                ));
            }
            config.oracle.timeout = timeout;
        }
        if let Some(v) = section.get("excluded_highways") {
            config.oracle.excluded_highways = parse_highway_list(v)?;
        }
    }

    // [session] section
    if let Some(section) = ini.section(Some("session")) {
        if let Some(v) = section.get("area_file") {
            let v = v.trim();
            if !v.is_empty() {
                config.session.area_file = expand_tilde(v);
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn parse_positive_f64(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    let reason = "must be a positive number";
    let parsed: f64 = parse_number(section, key, value, reason)?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(invalid(section, key, value, reason));
    }
    Ok(parsed)
}

fn parse_area(key: &str, value: &str) -> Result<f64, ConfigFileError> {
    let reason = "must be a non-negative number of square meters";
    let parsed: f64 = parse_number("fill", key, value, reason)?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(invalid("fill", key, value, reason));
    }
    Ok(parsed)
}

/// Parses a comma-separated list of `highway=*` classes. Empty means none.
fn parse_highway_list(value: &str) -> Result<Vec<String>, ConfigFileError> {
    let classes: Vec<String> = value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if let Some(bad) = classes
        .iter()
        .find(|c| !c.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_'))
    {
        return Err(invalid(
            "oracle",
            "excluded_highways",
            value,
            &format!("'{}' is not a valid highway class", bad),
        ));
    }

    Ok(classes)
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_values_overlay_defaults() {
        let config = load(
            r#"
[buffer]
radius_meters = 20.5

[fill]
batch_size = 5
on_oracle_failure = keep
call_timeout = 10
"#,
        )
        .unwrap();

        assert_eq!(config.buffer.radius_meters, 20.5);
        assert_eq!(config.fill.batch_size, 5);
        assert_eq!(config.fill.on_oracle_failure, FailSafe::AssumeStreets);
        assert_eq!(config.fill.call_timeout, 10);
        // Untouched sections keep their defaults
        assert_eq!(config.oracle, ConfigFile::default().oracle);
    }

    #[test]
    fn test_invalid_fail_safe() {
        let err = load("[fill]\non_oracle_failure = maybe\n").unwrap_err();
        assert!(err.to_string().contains("on_oracle_failure"));
        assert!(err.to_string().contains("'fill' or 'keep'"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = load("[fill]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "batch_size"
        ));
    }

    #[test]
    fn test_negative_radius_rejected() {
        assert!(load("[buffer]\nradius_meters = -3\n").is_err());
        assert!(load("[buffer]\nradius_meters = wide\n").is_err());
    }

    #[test]
    fn test_inverted_size_band_rejected() {
        let err = load("[fill]\nmin_block_area = 1000\nmax_block_area = 500\n").unwrap_err();
        assert!(err.to_string().contains("max_block_area"));
    }

    #[test]
    fn test_oracle_section() {
        let config = load(
            r#"
[oracle]
url = https://overpass.kumi.systems/api/interpreter
timeout = 60
excluded_highways = footway, Cycleway,,steps
"#,
        )
        .unwrap();

        assert_eq!(config.oracle.url, "https://overpass.kumi.systems/api/interpreter");
        assert_eq!(config.oracle.timeout, 60);
        assert_eq!(
            config.oracle.excluded_highways,
            vec!["footway", "cycleway", "steps"]
        );
    }

    #[test]
    fn test_empty_exclusion_list() {
        let config = load("[oracle]\nexcluded_highways =\n").unwrap();
        assert!(config.oracle.excluded_highways.is_empty());
    }

    #[test]
    fn test_invalid_oracle_values() {
        assert!(load("[oracle]\nurl = ftp://example.com\n").is_err());
        assert!(load("[oracle]\ntimeout = 0\n").is_err());
        assert!(load("[oracle]\nexcluded_highways = foot way\n").is_err());
    }

    #[test]
    fn test_paths_expand_tilde() {
        let config = load("[session]\narea_file = ~/walks/area.geojson\n").unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.session.area_file, home.join("walks/area.geojson"));
        }

        let config = load("[logging]\ndirectory = /var/log/wayfog\n").unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/wayfog"));
    }
}
