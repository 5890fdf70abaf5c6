//! Fill decision configuration.

use std::time::Duration;

use crate::blocks::SizeBand;

/// Default number of concurrent oracle calls per batch.
///
/// Keeps the public Overpass instances at roughly two requests a second.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Decision applied to a block whose street lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailSafe {
    /// Treat the block as empty and fill it (optimistic).
    #[default]
    AssumeNoStreets,
    /// Treat the block as containing streets and keep the hole (fail closed).
    AssumeStreets,
}

impl FailSafe {
    /// The street-presence answer this policy substitutes for a failure.
    pub fn has_streets(self) -> bool {
        matches!(self, FailSafe::AssumeStreets)
    }

    /// Config file spelling: `fill` or `keep`.
    pub fn as_str(self) -> &'static str {
        match self {
            FailSafe::AssumeNoStreets => "fill",
            FailSafe::AssumeStreets => "keep",
        }
    }

    /// Parses the config file spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "fill" => Some(FailSafe::AssumeNoStreets),
            "keep" => Some(FailSafe::AssumeStreets),
            _ => None,
        }
    }
}

/// Tunables of the fill decision engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FillConfig {
    /// Hole areas eligible for a street check.
    pub size_band: SizeBand,
    batch_size: usize,
    /// What a failed lookup resolves to.
    pub on_failure: FailSafe,
    /// Deadline for a single oracle call. `None` leaves it to the client.
    pub call_timeout: Option<Duration>,
}

impl FillConfig {
    /// Sets the batch width. Values below 1 are raised to 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_size_band(mut self, size_band: SizeBand) -> Self {
        self.size_band = size_band;
        self
    }

    pub fn with_fail_safe(mut self, on_failure: FailSafe) -> Self {
        self.on_failure = on_failure;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Option<Duration>) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Maximum number of concurrent oracle calls.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            size_band: SizeBand::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            on_failure: FailSafe::default(),
            call_timeout: None,
        }
    }
}

/// Per-invocation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillOptions {
    /// Fill every size-eligible hole without asking the oracle.
    ///
    /// Meant for continuous interaction such as live dragging, where a
    /// verified pass follows once the interaction ends.
    pub skip_street_check: bool,
}

impl FillOptions {
    /// Verified mode: every eligible hole is checked.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Optimistic mode: zero oracle calls.
    pub fn fast() -> Self {
        Self {
            skip_street_check: true,
        }
    }
}
