//! Configuration for wayfog components.
//!
//! User settings live in `~/.wayfog/config.ini`. A missing file means
//! defaults; values present in the file overlay the defaults.
//!
//! # Example
//!
//! ```
//! use wayfog::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let fill = config.to_fill_config();
//! assert_eq!(fill.batch_size(), 3);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    BufferSettings, ConfigFile, FillSettings, LoggingSettings, OracleSettings, SessionSettings,
};
