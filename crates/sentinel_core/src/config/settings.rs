//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field carries a serde default so partial config files load
//! cleanly.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Processing simulator settings.
    #[serde(default)]
    pub simulator: SimulatorSettings,
}

impl Settings {
    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), String> {
        if self.simulator.min_delay_ms > self.simulator.max_delay_ms {
            return Err(format!(
                "simulator.min_delay_ms ({}) exceeds simulator.max_delay_ms ({})",
                self.simulator.min_delay_ms, self.simulator.max_delay_ms
            ));
        }
        if self.simulator.max_delay_ms == 0 {
            return Err("simulator.max_delay_ms must be positive".to_string());
        }
        Ok(())
    }
}

/// Path configuration for run logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for per-run log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for application logs.
    #[serde(default)]
    pub level: LogLevel,

    /// Use compact run logs (throttle progress lines).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Progress update step percentage for compact mode.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,
}

fn default_true() -> bool {
    true
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: default_true(),
            progress_step: default_progress_step(),
        }
    }
}

/// Delay bounds for the processing simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// Minimum per-step delay in milliseconds.
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Maximum per-step delay in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    3000
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn reversed_delay_bounds_fail_validation() {
        let mut settings = Settings::default();
        settings.simulator.min_delay_ms = 5000;
        settings.simulator.max_delay_ms = 1000;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let settings: Settings = toml::from_str("[simulator]\nmin_delay_ms = 250\n").unwrap();
        assert_eq!(settings.simulator.min_delay_ms, 250);
        assert_eq!(settings.simulator.max_delay_ms, 3000);
        assert_eq!(settings.paths.logs_folder, ".logs");
        assert!(settings.logging.compact);
    }
}
