//! Helpers shared by command handlers.

use wayfog::fill::{FillOptions, FillStats};
use wayfog::geometry::Geometry;
use wayfog::session::SessionUpdate;

/// Prints a fill status update to stdout.
pub fn print_progress(message: &str, percent: f64) {
    println!("[{:>3.0}%] {}", percent, message);
}

/// Options for `--fast`.
pub fn fill_options(fast: bool) -> FillOptions {
    if fast {
        FillOptions::fast()
    } else {
        FillOptions::strict()
    }
}

/// Prints the outcome of a session update.
pub fn print_update(update: &SessionUpdate) {
    match update {
        SessionUpdate::Applied(outcome) => {
            print_stats(&outcome.stats);
            print_area(&outcome.geometry);
        }
        SessionUpdate::Superseded => println!("Result superseded by a newer operation"),
    }
}

fn print_stats(stats: &FillStats) {
    println!();
    println!("Blocks filled:     {}", stats.filled);
    println!("Blocks kept:       {}", stats.kept);
    println!("Holes out of range: {}", stats.retained);
    if stats.oracle_calls > 0 || stats.cache_hits > 0 {
        println!(
            "Street lookups:    {} ({} cached, {} failed)",
            stats.oracle_calls, stats.cache_hits, stats.oracle_failures
        );
    }
}

fn print_area(area: &Geometry) {
    println!(
        "Explored area:     {:.0} m² in {} polygon(s), {} hole(s)",
        wayfog::geometry::area_m2(area),
        area.polygon_count(),
        area.hole_count()
    );
}
