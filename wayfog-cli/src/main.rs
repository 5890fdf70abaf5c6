//! wayfog CLI - Command-line interface
//!
//! Records walked GeoJSON tracks into a persistent explored area and fills
//! in the city blocks they enclose.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::fill::FillArgs;
use commands::trace::TraceArgs;

#[derive(Parser)]
#[command(name = "wayfog")]
#[command(version = wayfog::VERSION)]
#[command(about = "Fog-of-war explored area from walked tracks", long_about = None)]
struct Cli {
    /// Enable debug logging (also mirrors log lines to stdout)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a GeoJSON track into the explored area
    Trace(TraceArgs),

    /// Re-run the block fill on the stored explored area
    Fill(FillArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Trace(args) => commands::trace::run(args, cli.verbose).await,
        Commands::Fill(args) => commands::fill::run(args, cli.verbose).await,
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
