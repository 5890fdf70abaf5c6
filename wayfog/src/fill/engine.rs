//! Fill decision engine.
//!
//! For each polygon of the explored area the engine walks the holes:
//!
//! 1. split them into size-ineligible holes (kept as is) and candidates
//! 2. resolve candidates from the street cache where possible
//! 3. look up the rest through the [`BatchScheduler`]
//! 4. drop every candidate without streets, keep the others
//!
//! The output ring list of a polygon is the outer ring, then the
//! size-ineligible holes, then the holes kept by decision, each group in
//! original order. A MultiPolygon is processed one polygon at a time and
//! stays a MultiPolygon.

use std::ops::AddAssign;
use std::sync::Arc;

use tracing::{debug, info};

use crate::blocks::{split_holes, HoleSplit};
use crate::cache::StreetCache;
use crate::geometry::{Geometry, Ring};
use crate::oracle::StreetOracle;

use super::config::{FillConfig, FillOptions};
use super::progress::ProgressSink;
use super::scheduler::{BatchScheduler, BATCH_PROGRESS_START};

/// MultiPolygons with more polygons than this get per-polygon status lines.
const POLYGON_PROGRESS_THRESHOLD: usize = 5;

/// Counters for one fill invocation, summed over all polygons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Candidate holes dropped because they contain no streets.
    pub filled: usize,
    /// Candidate holes kept because they contain streets.
    pub kept: usize,
    /// Holes outside the size band, kept without a lookup.
    pub retained: usize,
    /// Candidates answered from the street cache.
    pub cache_hits: usize,
    /// Oracle calls issued.
    pub oracle_calls: usize,
    /// Oracle calls that failed and fell back to the fail-safe answer.
    pub oracle_failures: usize,
}

impl AddAssign for FillStats {
    fn add_assign(&mut self, other: Self) {
        self.filled += other.filled;
        self.kept += other.kept;
        self.retained += other.retained;
        self.cache_hits += other.cache_hits;
        self.oracle_calls += other.oracle_calls;
        self.oracle_failures += other.oracle_failures;
    }
}

/// Result of a fill invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FillOutcome {
    pub geometry: Geometry,
    pub stats: FillStats,
}

/// Decides which enclosed holes of an explored area get filled.
pub struct BlockFiller<O: StreetOracle> {
    oracle: O,
    cache: Arc<dyn StreetCache>,
    config: FillConfig,
}

impl<O: StreetOracle> BlockFiller<O> {
    /// Creates an engine over an oracle and a shared street cache.
    pub fn new(oracle: O, cache: Arc<dyn StreetCache>, config: FillConfig) -> Self {
        Self {
            oracle,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<dyn StreetCache> {
        &self.cache
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Fills the street-free holes of `area`.
    ///
    /// Never fails. Outer rings are never altered, so the filled area is at
    /// least the input area. The output has the same kind (Polygon or
    /// MultiPolygon) and polygon count as the input.
    pub async fn fill(
        &self,
        area: &Geometry,
        options: FillOptions,
        progress: &dyn ProgressSink,
    ) -> FillOutcome {
        let mut stats = FillStats::default();

        let geometry = match area {
            Geometry::Polygon { coordinates } => {
                let (rings, polygon_stats) =
                    self.fill_polygon(coordinates, options, progress).await;
                stats += polygon_stats;
                Geometry::Polygon { coordinates: rings }
            }
            Geometry::MultiPolygon { coordinates } => {
                let total = coordinates.len();
                let mut polygons = Vec::with_capacity(total);
                for (index, rings) in coordinates.iter().enumerate() {
                    if total > POLYGON_PROGRESS_THRESHOLD && !options.skip_street_check {
                        progress.report(
                            &format!("Processing polygon {} of {}", index + 1, total),
                            100.0 * index as f64 / total as f64,
                        );
                    }
                    let (filled, polygon_stats) =
                        self.fill_polygon(rings, options, progress).await;
                    stats += polygon_stats;
                    polygons.push(filled);
                }
                Geometry::MultiPolygon {
                    coordinates: polygons,
                }
            }
        };

        info!(
            filled = stats.filled,
            kept = stats.kept,
            retained = stats.retained,
            cache_hits = stats.cache_hits,
            oracle_calls = stats.oracle_calls,
            oracle_failures = stats.oracle_failures,
            fast = options.skip_street_check,
            "Fill decision complete"
        );

        FillOutcome { geometry, stats }
    }

    async fn fill_polygon(
        &self,
        rings: &[Ring],
        options: FillOptions,
        progress: &dyn ProgressSink,
    ) -> (Vec<Ring>, FillStats) {
        if !options.skip_street_check {
            progress.report("Analyzing cleared area geometry...", 10.0);
        }

        let HoleSplit {
            outer,
            retained,
            eligible,
        } = split_holes(rings, &self.config.size_band);

        let mut stats = FillStats {
            retained: retained.len(),
            ..FillStats::default()
        };
        let mut output: Vec<Ring> = outer.into_iter().chain(retained).collect();

        if options.skip_street_check {
            stats.filled = eligible.len();
            debug!(filled = stats.filled, "Filled all eligible holes without street check");
            return (output, stats);
        }

        // Cache hits resolve before any batch runs
        let mut decisions: Vec<Option<bool>> = eligible
            .iter()
            .map(|candidate| self.cache.get(&candidate.key))
            .collect();
        stats.cache_hits = decisions.iter().filter(|d| d.is_some()).count();
        if stats.cache_hits > 0 {
            progress.report(
                &format!("Using cached results for {} blocks", stats.cache_hits),
                BATCH_PROGRESS_START,
            );
        }

        let misses: Vec<usize> = (0..eligible.len())
            .filter(|&i| decisions[i].is_none())
            .collect();
        if !misses.is_empty() {
            let pending: Vec<_> = misses.iter().map(|&i| eligible[i].clone()).collect();
            let scheduler = BatchScheduler::new(
                &self.oracle,
                self.config.batch_size(),
                self.config.on_failure,
                self.config.call_timeout,
            );
            let lookups = scheduler.run(&pending, progress).await;

            stats.oracle_calls = lookups.len();
            for (&index, lookup) in misses.iter().zip(lookups) {
                match lookup.answer() {
                    Some(answer) => self.cache.set(eligible[index].key.clone(), answer),
                    None => stats.oracle_failures += 1,
                }
                decisions[index] = Some(lookup.has_streets());
            }
        }

        for (candidate, has_streets) in eligible.into_iter().zip(decisions) {
            if has_streets.unwrap_or(false) {
                stats.kept += 1;
                output.push(candidate.ring);
            } else {
                stats.filled += 1;
            }
        }

        progress.report(
            &format!("Complete! Filled: {}, Kept: {}", stats.filled, stats.kept),
            100.0,
        );

        (output, stats)
    }
}
