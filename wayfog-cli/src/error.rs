//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use wayfog::config::ConfigFileError;
use wayfog::geojson::GeoJsonError;
use wayfog::oracle::OracleError;
use wayfog::session::SessionError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create the street oracle client
    OracleCreation(OracleError),
    /// Failed to read an input file
    FileRead { path: PathBuf, error: std::io::Error },
    /// Failed to write an output file
    FileWrite { path: PathBuf, error: std::io::Error },
    /// Input file is not usable GeoJSON
    InvalidInput { path: PathBuf, error: GeoJsonError },
    /// Session operation failed
    Session(SessionError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::InvalidInput { .. } => {
                eprintln!();
                eprintln!("Tracks must be GeoJSON LineString or MultiLineString geometries,");
                eprintln!("either bare, wrapped in a Feature, or inside a FeatureCollection.");
            }
            CliError::Session(SessionError::NoArea) => {
                eprintln!();
                eprintln!("Record a track first with: wayfog trace <TRACK>");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::OracleCreation(e) => write!(f, "Failed to create street oracle: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path.display(), error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
            CliError::InvalidInput { path, error } => {
                write!(f, "Invalid GeoJSON in '{}': {}", path.display(), error)
            }
            CliError::Session(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::OracleCreation(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::InvalidInput { error, .. } => Some(error),
            CliError::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Session(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_message_names_path() {
        let err = CliError::FileRead {
            path: PathBuf::from("walk.geojson"),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read file 'walk.geojson': not found"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigFileError::InvalidValue {
            section: "fill".to_string(),
            key: "batch_size".to_string(),
            value: "0".to_string(),
            reason: "must be an integer >= 1".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Configuration error: "));
        assert!(err.to_string().contains("fill.batch_size"));
    }
}
