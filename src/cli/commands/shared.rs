//! Shared components for CLI commands
//!
//! Logging setup, progress bars, and the batch summary reported after a
//! run, used across the command implementations.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::app::services::wave_loader::LoadReport;
use crate::Result;

/// Summary of one CLI invocation across all stations and files
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Stations processed
    pub stations_processed: usize,
    /// Files successfully decoded and loaded
    pub files_loaded: usize,
    /// Files skipped (undecodable, or their station failed to resolve)
    pub files_skipped: usize,
    /// Merged row-level tallies across every load call
    pub totals: LoadReport,
}

impl BatchSummary {
    /// Fold one file's load report into the batch totals
    pub fn absorb(&mut self, report: &LoadReport) {
        self.files_loaded += 1;
        self.totals.merge(report);
    }
}

/// Set up structured logging to stderr at the requested level
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("waves_loader={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Create a progress bar over a batch of files
pub fn create_progress_bar(total_files: u64, show: bool) -> Option<ProgressBar> {
    if !show {
        return None;
    }

    let bar = ProgressBar::new(total_files);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );
    Some(bar)
}
