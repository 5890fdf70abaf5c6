//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use clap::Subcommand;
use wayfog::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a commented configuration file with default values
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init { force } => run_init(force),
    }
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_show() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("[buffer]");
    println!("  radius_meters     = {}", config.buffer.radius_meters);
    println!("[fill]");
    println!("  min_block_area    = {}", config.fill.min_block_area);
    println!("  max_block_area    = {}", config.fill.max_block_area);
    println!("  batch_size        = {}", config.fill.batch_size);
    println!(
        "  on_oracle_failure = {}",
        config.fill.on_oracle_failure.as_str()
    );
    println!("  call_timeout      = {}", config.fill.call_timeout);
    println!("[oracle]");
    println!("  url               = {}", config.oracle.url);
    println!("  timeout           = {}", config.oracle.timeout);
    println!(
        "  excluded_highways = {}",
        config.oracle.excluded_highways.join(",")
    );
    println!("[session]");
    println!("  area_file         = {}", config.session.area_file.display());
    println!("[logging]");
    println!("  directory         = {}", config.logging.directory.display());

    Ok(())
}

fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path();
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
