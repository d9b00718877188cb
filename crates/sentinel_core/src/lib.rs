//! Sentinel Core - Backend logic for Road Sentinel
//!
//! This crate contains all business logic with zero UI dependencies:
//! the anomaly catalog and dashboard aggregations, the processing
//! timeline simulator, session state, configuration, and logging.
//! It can be used by the dashboard front end or a CLI tool.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;
pub mod simulator;
pub mod stats;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
