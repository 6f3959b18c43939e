//! Command implementations for the waves loader CLI
//!
//! Each command lives in its own module; `run` dispatches on the parsed
//! arguments and returns the batch summary used for exit reporting.

pub mod ingest;
pub mod shared;
pub mod sites;

// Re-export the main types for convenience
pub use shared::BatchSummary;

use crate::cli::args::{Args, Commands};
use crate::Result;

/// Main command runner for the waves loader
///
/// Dispatches to the subcommand handlers:
/// - `ingest`: decode and load WLS files for one or more stations
/// - `sites`: list or register sites in the observation store
pub fn run(args: Args) -> Result<BatchSummary> {
    match args.get_command() {
        Commands::Ingest(ingest_args) => ingest::run_ingest(ingest_args),
        Commands::Sites(sites_args) => sites::run_sites(sites_args),
    }
}
