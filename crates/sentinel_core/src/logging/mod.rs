//! Logging infrastructure for Road Sentinel.
//!
//! This module provides:
//! - Per-run loggers with file + UI callback dual output
//! - Compact mode with progress throttling
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```no_run
//! use sentinel_core::logging::{LogConfig, RunLogger};
//!
//! let logger = RunLogger::new("upload_run", ".logs", LogConfig::default(), None)?;
//! logger.phase("Frame Extraction");
//! logger.progress(17);
//! logger.success("Run completed");
//! # Ok::<(), std::io::Error>(())
//! ```

mod run_logger;
mod types;

pub use run_logger::RunLogger;
pub use types::{LogConfig, LogLevel, MessagePrefix, UiLogCallback};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber for application-wide logging.
///
/// Respects `RUST_LOG` when set, otherwise falls back to the provided
/// default level. Outputs to stderr. Should be called once at startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
