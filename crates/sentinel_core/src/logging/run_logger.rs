//! Per-run logger with file and callback output.
//!
//! Each processing run gets its own logger that writes to a dedicated log
//! file and optionally mirrors every line to a UI callback. Compact mode
//! throttles progress lines to the configured step size.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, MessagePrefix, UiLogCallback};

/// Per-run logger with dual output (file + UI).
pub struct RunLogger {
    /// Run name for identification.
    run_name: String,
    /// Path to log file.
    log_path: PathBuf,
    /// File writer (buffered).
    file_writer: Mutex<BufWriter<File>>,
    /// UI callback for mirroring lines.
    ui_callback: Option<UiLogCallback>,
    /// Logging configuration.
    config: LogConfig,
    /// Last progress value logged (for compact mode throttling).
    last_progress: Mutex<u32>,
}

impl RunLogger {
    /// Create a new run logger.
    ///
    /// # Arguments
    /// * `run_name` - Name of the run (used in the log filename)
    /// * `log_dir` - Directory to write the log file to
    /// * `config` - Logging configuration
    /// * `ui_callback` - Optional callback for UI output
    pub fn new(
        run_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        ui_callback: Option<UiLogCallback>,
    ) -> std::io::Result<Self> {
        let run_name = run_name.into();
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)?;
        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&run_name)));
        let file_writer = BufWriter::new(File::create(&log_path)?);

        Ok(Self {
            run_name,
            log_path,
            file_writer: Mutex::new(file_writer),
            ui_callback,
            config,
            last_progress: Mutex::new(0),
        })
    }

    /// Get the run name.
    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    /// Get the log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }
        self.output(&self.format_message(message));
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Log the start of a named phase (timeline step).
    pub fn phase(&self, name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(name));
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Log an overall-progress update.
    ///
    /// In compact mode, only logs when progress crossed the configured
    /// step boundary (or hit 100%).
    pub fn progress(&self, percent: u32) {
        if self.config.compact {
            let mut last = self.last_progress.lock();
            let step = self.config.progress_step.max(1);
            if percent < 100 && percent / step == *last / step {
                return;
            }
            *last = percent;
        }
        self.log(LogLevel::Info, &format!("Progress: {}%", percent));
    }

    /// Flush buffered output to disk.
    pub fn flush(&self) {
        let _ = self.file_writer.lock().flush();
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, line: &str) {
        {
            let mut writer = self.file_writer.lock();
            let _ = writeln!(writer, "{}", line);
        }
        if let Some(callback) = &self.ui_callback {
            callback(line);
        }
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Replace filesystem-hostile characters in a run name.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn writes_lines_to_file_and_callback() {
        let dir = TempDir::new().unwrap();
        let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let lines_clone = Arc::clone(&lines);

        let logger = RunLogger::new(
            "upload run",
            dir.path(),
            LogConfig {
                show_timestamps: false,
                ..LogConfig::default()
            },
            Some(Arc::new(move |line: &str| {
                lines_clone.lock().push(line.to_string());
            })),
        )
        .unwrap();

        logger.phase("Frame Extraction");
        logger.success("Frame Extraction completed");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("--- Frame Extraction ---"));
        assert!(content.contains("[OK] Frame Extraction completed"));
        assert_eq!(lines.lock().len(), 2);
    }

    #[test]
    fn debug_lines_are_filtered_at_info_level() {
        let dir = TempDir::new().unwrap();
        let logger = RunLogger::new("run", dir.path(), LogConfig::default(), None).unwrap();

        logger.debug("hidden");
        logger.info("visible");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(!content.contains("hidden"));
        assert!(content.contains("visible"));
    }

    #[test]
    fn compact_mode_throttles_progress() {
        let dir = TempDir::new().unwrap();
        let logger = RunLogger::new(
            "run",
            dir.path(),
            LogConfig {
                show_timestamps: false,
                compact: true,
                progress_step: 20,
                ..LogConfig::default()
            },
            None,
        )
        .unwrap();

        for percent in [5, 10, 17, 33, 50, 67, 83, 100] {
            logger.progress(percent);
        }
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(!content.contains("Progress: 10%"));
        assert!(content.contains("Progress: 33%"));
        assert!(content.contains("Progress: 100%"));
    }

    #[test]
    fn run_names_are_sanitized_for_filenames() {
        let dir = TempDir::new().unwrap();
        let logger = RunLogger::new("drone survey 12/03", dir.path(), LogConfig::default(), None)
            .unwrap();
        assert!(logger
            .log_path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap()
            .starts_with("drone_survey_12_03"));
    }
}
