//! Fill decision: closing enclosed holes that contain no streets.
//!
//! A hole fully surrounded by explored corridor is usually a city block
//! the walker went around. If no road runs through it, there is nothing
//! left to explore inside and the hole is filled. [`BlockFiller`] makes
//! that decision per hole, asking a [`StreetOracle`](crate::oracle::StreetOracle)
//! in rate-limited batches and remembering answers in a
//! [`StreetCache`](crate::cache::StreetCache).

mod config;
mod engine;
mod progress;
mod scheduler;

pub use config::{FailSafe, FillConfig, FillOptions, DEFAULT_BATCH_SIZE};
pub use engine::{BlockFiller, FillOutcome, FillStats};
pub use progress::{NoProgress, ProgressEvent, ProgressRecorder, ProgressSink, TracingProgress};
pub use scheduler::{BatchScheduler, Lookup};
