//! Application configuration.
//!
//! TOML-backed settings with section-level defaults, plus a manager that
//! handles loading, validation, and atomic saves.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{LoggingSettings, PathSettings, Settings, SimulatorSettings};
