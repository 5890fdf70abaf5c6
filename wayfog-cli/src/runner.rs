//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, session creation, and area file
//! handling to reduce duplication across command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use wayfog::cache::MemoryStreetCache;
use wayfog::config::ConfigFile;
use wayfog::fill::BlockFiller;
use wayfog::logging::{default_log_file, init_logging, LoggingGuard};
use wayfog::oracle::{AsyncReqwestClient, OverpassOracle};
use wayfog::session::ExplorationSession;

use crate::error::CliError;

/// Session type used by every CLI command.
pub type CliSession = ExplorationSession<OverpassOracle<AsyncReqwestClient>>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// Log lines go to the log file; they are mirrored to stdout only in
    /// verbose mode so they do not interleave with progress output.
    pub fn with_verbose(verbose: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let logging_guard = init_logging(
            &config.logging.directory,
            default_log_file(),
            verbose,
            verbose,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("wayfog v{}", wayfog::VERSION);
        info!("wayfog CLI: {} command", command);
    }

    /// Area file to use: the explicit one, else the configured one.
    pub fn area_file(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| self.config.session.area_file.clone())
    }

    /// Create a session backed by the configured Overpass oracle.
    ///
    /// `radius_m` overrides the configured corridor radius.
    pub fn create_session(&self, radius_m: Option<f64>) -> Result<CliSession, CliError> {
        let oracle_config = self.config.to_oracle_config();
        let http_client = AsyncReqwestClient::with_timeout(oracle_config.timeout_secs)
            .map_err(CliError::OracleCreation)?;
        let oracle = OverpassOracle::with_config(http_client, &oracle_config);

        let filler = BlockFiller::new(
            oracle,
            Arc::new(MemoryStreetCache::new()),
            self.config.to_fill_config(),
        );
        let radius_m = radius_m.unwrap_or(self.config.buffer.radius_meters);
        info!(
            endpoint = %oracle_config.url,
            radius_m,
            batch_size = self.config.fill.batch_size,
            "Session created"
        );

        Ok(ExplorationSession::new(filler, radius_m))
    }

    /// Load the explored area from `path` into the session, if the file exists.
    ///
    /// Returns true when an area was loaded.
    pub fn load_area(&self, session: &CliSession, path: &Path) -> Result<bool, CliError> {
        if !path.exists() {
            info!(path = %path.display(), "No explored area file yet, starting empty");
            return Ok(false);
        }
        let json = read_file(path)?;
        session.import(&json)?;
        Ok(true)
    }

    /// Write the session's explored area to `path`.
    pub fn save_area(&self, session: &CliSession, path: &Path) -> Result<(), CliError> {
        let json = session.export("Explored area")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CliError::FileWrite {
                path: parent.to_path_buf(),
                error: e,
            })?;
        }
        std::fs::write(path, json).map_err(|e| CliError::FileWrite {
            path: path.to_path_buf(),
            error: e,
        })?;

        info!(path = %path.display(), "Explored area saved");
        Ok(())
    }
}

/// Read a whole file as UTF-8.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::FileRead {
        path: path.to_path_buf(),
        error: e,
    })
}
