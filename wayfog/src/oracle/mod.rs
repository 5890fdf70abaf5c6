//! Street oracle: does any qualifying road cross a bounding box?
//!
//! The engine only depends on the [`StreetOracle`] trait. The production
//! implementation, [`OverpassOracle`], posts an Overpass QL query per box
//! through an [`AsyncHttpClient`] and reads street presence from the size
//! of the returned `elements` array.
//!
//! Failures surface as [`OracleError`]; resolving them to a decision is
//! the batch scheduler's job, never the oracle's.

mod http;
mod overpass;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use overpass::{
    OracleConfig, OverpassOracle, DEFAULT_EXCLUDED_HIGHWAYS, DEFAULT_ORACLE_TIMEOUT_SECS,
    DEFAULT_ORACLE_URL,
};
pub use types::{OracleError, StreetOracle};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
