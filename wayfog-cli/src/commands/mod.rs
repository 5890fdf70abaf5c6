//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`fill`] - Re-run the fill decision on the stored explored area
//! - [`trace`] - Record a GeoJSON track into the explored area

pub mod common;
pub mod config;
pub mod fill;
pub mod trace;
