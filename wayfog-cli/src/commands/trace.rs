//! Record a walked track into the explored area.

use std::path::PathBuf;

use clap::Args;
use tracing::info;
use wayfog::geojson;

use super::common::{fill_options, print_progress, print_update};
use crate::error::CliError;
use crate::runner::{read_file, CliRunner};

/// Arguments for `wayfog trace`.
#[derive(Debug, Args)]
pub struct TraceArgs {
    /// GeoJSON track (LineString or MultiLineString; bare, Feature or FeatureCollection)
    pub track: PathBuf,

    /// Explored area file (default: session.area_file from config)
    #[arg(long)]
    pub area: Option<PathBuf>,

    /// Corridor radius in meters (default: buffer.radius_meters from config)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Fill every eligible block without checking for streets
    #[arg(long)]
    pub fast: bool,
}

/// Run `wayfog trace`.
pub async fn run(args: TraceArgs, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_verbose(verbose)?;
    runner.log_startup("trace");

    let path = geojson::parse_path(&read_file(&args.track)?).map_err(|error| {
        CliError::InvalidInput {
            path: args.track.clone(),
            error,
        }
    })?;

    let area_file = runner.area_file(args.area);
    let session = runner.create_session(args.radius)?;
    if runner.load_area(&session, &area_file)? {
        println!("Loaded explored area from {}", area_file.display());
    }

    info!(track = %args.track.display(), lines = path.lines().len(), "Recording track");
    println!(
        "Recording {} ({} m corridor)...",
        args.track.display(),
        session.radius_m()
    );

    let update = session
        .record_path(&path, fill_options(args.fast), &print_progress)
        .await?;
    print_update(&update);

    runner.save_area(&session, &area_file)?;
    println!("Saved explored area to {}", area_file.display());
    Ok(())
}
