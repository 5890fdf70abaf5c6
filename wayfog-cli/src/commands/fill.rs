//! Re-run the fill decision on the stored explored area.

use std::path::PathBuf;

use clap::Args;

use super::common::{fill_options, print_progress, print_update};
use crate::error::CliError;
use crate::runner::CliRunner;
use wayfog::session::SessionError;

/// Arguments for `wayfog fill`.
#[derive(Debug, Args)]
pub struct FillArgs {
    /// Explored area file (default: session.area_file from config)
    #[arg(long)]
    pub area: Option<PathBuf>,

    /// Fill every eligible block without checking for streets
    #[arg(long)]
    pub fast: bool,
}

/// Run `wayfog fill`.
pub async fn run(args: FillArgs, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_verbose(verbose)?;
    runner.log_startup("fill");

    let area_file = runner.area_file(args.area);
    let session = runner.create_session(None)?;
    if !runner.load_area(&session, &area_file)? {
        return Err(CliError::Session(SessionError::NoArea));
    }

    let update = session
        .refill(fill_options(args.fast), &print_progress)
        .await?;
    print_update(&update);

    runner.save_area(&session, &area_file)?;
    println!("Saved explored area to {}", area_file.display());
    Ok(())
}
