//! Street oracle trait and error type.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::geometry::BoundingBox;

/// Why a street lookup produced no answer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    /// Network failure or non-success HTTP status.
    #[error("Street oracle unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something that is not the expected JSON.
    #[error("Invalid street oracle response: {0}")]
    InvalidResponse(String),

    /// The per-call deadline elapsed before an answer arrived.
    #[error("Street oracle call timed out after {0:?}")]
    TimedOut(Duration),
}

/// Answers whether at least one qualifying road lies within a box.
///
/// "Qualifying" excludes minor way classes that do not subdivide a block
/// (footways, service roads and the like); which classes are excluded is
/// up to the implementation.
pub trait StreetOracle: Send + Sync {
    /// Looks up street presence inside `bbox`.
    fn has_streets(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<bool, OracleError>> + Send;
}

impl<O: StreetOracle> StreetOracle for Arc<O> {
    fn has_streets(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<bool, OracleError>> + Send {
        (**self).has_streets(bbox)
    }
}
