//! Command-line argument definitions for the waves loader
//!
//! Defines the CLI interface using the clap derive API: the `ingest`
//! command that decodes and loads wave files, and the `sites` command that
//! manages station registration in the store.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::{Error, Result};

/// CLI arguments for the SeaSonde waves loader
///
/// Ingests CODAR SeaSonde wave measurement files (WLS) from coastal HF
/// radar stations into a relational store without duplicating previously
/// stored records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "waves-loader",
    version,
    about = "Load SeaSonde wave (WLS) files into a relational observation store",
    long_about = "Decodes the SeaSonde WLS wave-data text format, handling both historical \
                  layouts of the format, and loads one observation per valid data row into \
                  a store with a unique (site, range cell, timestamp) constraint. Re-running \
                  a load is always safe: duplicates are detected in the store and skipped."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the waves loader
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode and load WLS files for one station or the configured set
    Ingest(IngestArgs),
    /// List or register sites in the observation store
    Sites(SitesArgs),
}

/// Arguments for the ingest command (main loading workflow)
#[derive(Debug, Clone, Parser)]
pub struct IngestArgs {
    /// Input path: a directory of .wls files, a single .wls file, or —
    /// when no station is named — a root directory containing one
    /// subdirectory per station code
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Directory of .wls files (or a single file)"
    )]
    pub input: PathBuf,

    /// Station code the files belong to (e.g. PRIO)
    ///
    /// If omitted, every station from the configuration is processed,
    /// each expecting its files under <input>/<CODE>/.
    #[arg(
        short = 's',
        long = "station",
        value_name = "CODE",
        help = "Station code owning the input files"
    )]
    pub station: Option<String>,

    /// Path of the SQLite observation database
    ///
    /// Overrides the configured location. Created on first use.
    #[arg(
        long = "database",
        value_name = "PATH",
        help = "Path of the observation database"
    )]
    pub database: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// JSON configuration with the database location and default station
    /// list. If not specified, looks for the file under the user config
    /// directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Delete each file after it has been successfully loaded
    #[arg(
        long = "delete-processed",
        help = "Remove files that loaded without error"
    )]
    pub delete_processed: bool,

    /// Decode files and report what would be loaded without writing
    #[arg(long = "dry-run", help = "Decode and report without writing to the store")]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the sites command (store site management)
#[derive(Debug, Clone, Parser)]
pub struct SitesArgs {
    /// Register a new station code before listing
    #[arg(long = "add", value_name = "CODE", help = "Register a station code")]
    pub add: Option<String>,

    /// Path of the SQLite observation database
    #[arg(
        long = "database",
        value_name = "PATH",
        help = "Path of the observation database"
    )]
    pub database: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl IngestArgs {
    /// Validate the ingest arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input.display()
            )));
        }

        if let Some(station) = &self.station {
            validate_station_code(station)?;
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl SitesArgs {
    /// Validate the sites arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(code) = &self.add {
            validate_station_code(code)?;
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Station codes are short uppercase identifiers (e.g. PRIO, SILL)
fn validate_station_code(code: &str) -> Result<()> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(Error::data_validation(
            "Station code cannot be empty".to_string(),
        ));
    }

    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::data_validation(format!(
            "Invalid station code '{}': expected a short alphanumeric code",
            code
        )));
    }

    Ok(())
}
