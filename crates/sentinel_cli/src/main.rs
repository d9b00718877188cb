//! Road Sentinel terminal front end.
//!
//! Renders the dashboard data from `sentinel_core` and drives a simulated
//! processing run, standing in for the web UI during backend development.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use sentinel_core::catalog;
use sentinel_core::config::{ConfigManager, Settings};
use sentinel_core::logging::{self, LogConfig, RunLogger};
use sentinel_core::simulator::{
    standard_timeline, DelaySource, FixedDelay, TimelineSimulator, UniformDelay,
};
use sentinel_core::stats::{kind_distribution, severity_distribution, DashboardStats};

#[derive(Parser, Debug)]
#[command(name = "road-sentinel")]
#[command(author, version, about = "Road infrastructure monitoring dashboard")]
struct Cli {
    /// Path to a TOML settings file (created with defaults when missing)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the dashboard: stat cards, sector health, and distributions
    Dashboard,
    /// List recent upload activity
    Activity,
    /// Run the processing timeline simulator for one upload
    Process {
        /// Name for the run (used in the run-log filename)
        #[arg(long, default_value = "upload_run")]
        name: String,

        /// Seed the delay source for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Override the configured minimum per-step delay
        #[arg(long)]
        min_delay_ms: Option<u64>,

        /// Override the configured maximum per-step delay
        #[arg(long)]
        max_delay_ms: Option<u64>,

        /// Use a fixed per-step delay instead of a range
        #[arg(long, conflicts_with_all = ["min_delay_ms", "max_delay_ms"])]
        fixed_delay_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    logging::init_tracing(settings.logging.level);

    match cli.command {
        Command::Dashboard => show_dashboard(),
        Command::Activity => show_activity(),
        Command::Process {
            name,
            seed,
            min_delay_ms,
            max_delay_ms,
            fixed_delay_ms,
        } => {
            let min = Duration::from_millis(min_delay_ms.unwrap_or(settings.simulator.min_delay_ms));
            let max = Duration::from_millis(max_delay_ms.unwrap_or(settings.simulator.max_delay_ms));
            run_processing(&settings, &name, seed, min, max, fixed_delay_ms)
        }
    }
}

fn load_settings(path: Option<&std::path::Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            let mut manager = ConfigManager::new(path);
            manager
                .load_or_create()
                .with_context(|| format!("loading settings from {}", path.display()))?;
            Ok(manager.settings().clone())
        }
        None => Ok(Settings::default()),
    }
}

fn show_dashboard() -> Result<()> {
    let anomalies = catalog::sample_anomalies();
    let health = catalog::sector_health();
    let activity = catalog::recent_activity();
    let stats = DashboardStats::compute(&anomalies, &health, &activity);

    println!("Road Sentinel Dashboard");
    println!();
    println!("  Total anomalies:      {}", stats.total_anomalies);
    println!("  Videos processed:     {}", stats.videos_processed);
    println!("  Overall health score: {}", stats.overall_health_score);
    println!(
        "  Most affected sector: {}",
        stats.most_affected_sector.as_deref().unwrap_or("-")
    );
    println!();

    println!("  Sector health:");
    for sector in &health {
        println!(
            "    {:<10} health {:>3}  anomalies {:>2}  updated {}",
            sector.sector,
            sector.health_index,
            sector.anomaly_count,
            sector.last_updated.format("%Y-%m-%d %H:%M")
        );
    }
    println!();

    println!("  By severity:");
    for slice in severity_distribution(&anomalies) {
        println!("    {:<10} {}", slice.name, slice.value);
    }
    println!();

    println!("  By kind:");
    for slice in kind_distribution(&anomalies) {
        println!("    {:<13} {}", slice.name, slice.value);
    }

    Ok(())
}

fn show_activity() -> Result<()> {
    println!("Recent upload activity:");
    for entry in catalog::recent_activity() {
        println!(
            "  {:<30} {:<10} detected {:>2}  {}  {}",
            entry.file,
            entry.status.to_string(),
            entry.detected,
            entry.duration.as_deref().unwrap_or("--:--"),
            entry.timestamp.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn run_processing(
    settings: &Settings,
    name: &str,
    seed: Option<u64>,
    min: Duration,
    max: Duration,
    fixed_delay_ms: Option<u64>,
) -> Result<()> {
    let delay: Box<dyn DelaySource> = match (fixed_delay_ms, seed) {
        (Some(ms), _) => Box::new(FixedDelay(Duration::from_millis(ms))),
        (None, Some(seed)) => Box::new(UniformDelay::seeded(min, max, seed)),
        (None, None) => Box::new(UniformDelay::new(min, max)),
    };

    let log_config = LogConfig {
        level: settings.logging.level,
        compact: settings.logging.compact,
        progress_step: settings.logging.progress_step,
        ..LogConfig::default()
    };
    let logger = Arc::new(
        RunLogger::new(name, &settings.paths.logs_folder, log_config, None)
            .context("creating run log")?,
    );
    logger.info(&format!("Processing run '{}' started", name));

    let (done_tx, done_rx) = mpsc::channel();
    let progress_logger = Arc::clone(&logger);

    let steps = standard_timeline();
    let step_count = steps.len();
    let simulator = TimelineSimulator::new(steps, delay)?
        .with_progress_callback(Arc::new(move |step: &str, percent: u32, message: &str| {
            println!("  [{:>3}%] {}", percent, message);
            progress_logger.phase(step);
            progress_logger.progress(percent);
        }))
        .with_completion_callback(Arc::new(move || {
            let _ = done_tx.send(());
        }));

    println!("Processing '{}' ({} steps):", name, step_count);
    simulator.start()?;

    // Worst case is every step at the upper delay bound; pad generously.
    let per_step = fixed_delay_ms.unwrap_or(max.as_millis() as u64);
    let deadline = Duration::from_millis(per_step * step_count as u64 + 5000);
    if done_rx.recv_timeout(deadline).is_err() {
        simulator.reset();
        bail!("processing run did not finish within {:?}", deadline);
    }

    println!();
    println!("Timeline:");
    for step in simulator.snapshot() {
        println!(
            "  {} {:<20} {}",
            step.id,
            step.name,
            step.duration.as_deref().unwrap_or("-")
        );
    }
    println!("Overall progress: {}%", simulator.progress());
    logger.success("Run completed");
    tracing::info!(run = name, "processing run completed");

    Ok(())
}
