//! wayfog - explored-area engine for fog-of-war walking maps
//!
//! Walked paths are turned into an explored area: each path is buffered
//! into a corridor, merged into the area, and enclosed holes that contain
//! no streets (city blocks walked around) are filled in.
//!
//! # High-Level API
//!
//! [`session::ExplorationSession`] owns the explored area and drives the
//! whole pipeline:
//!
//! ```ignore
//! use std::sync::Arc;
//! use wayfog::cache::MemoryStreetCache;
//! use wayfog::fill::{BlockFiller, FillConfig, FillOptions, TracingProgress};
//! use wayfog::oracle::{AsyncReqwestClient, OverpassOracle};
//! use wayfog::session::ExplorationSession;
//!
//! let oracle = OverpassOracle::new(AsyncReqwestClient::with_timeout(25)?);
//! let filler = BlockFiller::new(oracle, Arc::new(MemoryStreetCache::new()), FillConfig::default());
//! let session = ExplorationSession::new(filler, 15.0);
//!
//! let path = wayfog::geojson::parse_path(&track_json)?;
//! session.record_path(&path, FillOptions::strict(), &TracingProgress).await?;
//! std::fs::write("explored.geojson", session.export("Explored area")?)?;
//! ```

pub mod blocks;
pub mod cache;
pub mod config;
pub mod fill;
pub mod geojson;
pub mod geometry;
pub mod logging;
pub mod oracle;
pub mod session;

/// Version of the wayfog library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
