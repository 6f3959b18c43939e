//! Ingest command implementation
//!
//! Discovers `.wls` files for one station (or the whole configured set),
//! decodes each file, and loads its observations. A file that cannot be
//! decoded is reported and skipped; the batch carries on. Store-level
//! failures abort the run.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{error, info, warn};

use crate::app::adapters::filesystem::{find_wls_files, remove_processed};
use crate::app::services::store::{ObservationStore, SqliteStore};
use crate::app::services::wave_loader::{LoadReport, WaveLoader};
use crate::app::services::wls_decoder::WlsDecoder;
use crate::cli::args::IngestArgs;
use crate::config::Config;
use crate::{Error, Result};

use super::shared::{create_progress_bar, setup_logging, BatchSummary};

/// Run the ingest workflow
pub fn run_ingest(args: IngestArgs) -> Result<BatchSummary> {
    args.validate()?;
    setup_logging(args.get_log_level(), args.quiet)?;

    let config = Config::load(args.config_file.as_deref())?;
    let database_path = args
        .database
        .clone()
        .unwrap_or_else(|| config.database_path.clone());

    let store = open_store(&database_path, args.dry_run)?;

    let batches = station_batches(&args, &config);
    let decoder = WlsDecoder::new();
    let loader = WaveLoader::new();
    let mut summary = BatchSummary::default();

    for (code, directory) in batches {
        if !directory.exists() {
            warn!(
                "No directory for station '{}' at {}; skipping",
                code,
                directory.display()
            );
            continue;
        }

        let files = find_wls_files(&directory)?;
        info!("Station '{}': {} wave files found", code, files.len());
        summary.stations_processed += 1;

        if let Some(store) = &store {
            if store.resolve_site(&code)?.is_none() {
                error!(
                    "Station '{}' is not registered in the store; run `waves-loader sites --add {}`",
                    code, code
                );
                summary.files_skipped += files.len();
                continue;
            }
        }

        let bar = create_progress_bar(files.len() as u64, args.show_progress());
        for file in files {
            if let Some(bar) = &bar {
                bar.set_message(
                    file.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                );
            }

            match process_file(&decoder, &loader, &code, &file, store.as_ref()) {
                Ok(report) => {
                    summary.absorb(&report);
                    if args.delete_processed && !args.dry_run {
                        remove_processed(&file);
                    }
                }
                Err(Error::MissingHeader { file }) => {
                    warn!("Skipping undecodable file {}", file);
                    summary.files_skipped += 1;
                }
                Err(other) => return Err(other),
            }

            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }

    if !args.quiet {
        print_summary(&summary, args.dry_run);
    }

    Ok(summary)
}

/// Open the observation store, or skip entirely for a dry run so no
/// database file is created as a side effect
fn open_store(path: &Path, dry_run: bool) -> Result<Option<SqliteStore>> {
    if dry_run {
        info!("Dry run: the store at {} will not be touched", path.display());
        return Ok(None);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create {}", parent.display()), e)
            })?;
        }
    }

    Ok(Some(SqliteStore::open(path)?))
}

/// Pair each station code with the directory holding its files.
///
/// With an explicit station the input path is used verbatim; otherwise the
/// configured stations each map to `<input>/<CODE>/`.
fn station_batches(args: &IngestArgs, config: &Config) -> Vec<(String, PathBuf)> {
    match &args.station {
        Some(code) => vec![(code.clone(), args.input.clone())],
        None => config
            .stations
            .iter()
            .map(|code| (code.clone(), args.input.join(code)))
            .collect(),
    }
}

/// Decode one file and, unless this is a dry run, load it
fn process_file(
    decoder: &WlsDecoder,
    loader: &WaveLoader,
    station: &str,
    file: &Path,
    store: Option<&SqliteStore>,
) -> Result<LoadReport> {
    let decoded = decoder.decode_file(file)?;

    for diagnostic in &decoded.stats.diagnostics {
        warn!("{}: {}", file.display(), diagnostic);
    }

    match store {
        Some(store) => loader.load(station, &decoded, store),
        None => {
            info!(
                "Dry run: {} would offer {} rows across {} range cells",
                file.display(),
                decoded.row_count(),
                decoded.tables.len()
            );
            Ok(LoadReport {
                rows_seen: decoded.row_count(),
                ..LoadReport::default()
            })
        }
    }
}

/// Print the human-readable batch summary
fn print_summary(summary: &BatchSummary, dry_run: bool) {
    let heading = if dry_run {
        "Dry run complete".yellow().bold()
    } else {
        "Ingest complete".green().bold()
    };

    println!();
    println!("{}", heading);
    println!(
        "  stations: {}   files loaded: {}   files skipped: {}",
        summary.stations_processed, summary.files_loaded, summary.files_skipped
    );
    println!(
        "  rows: {}   inserted: {}   already present: {}   skipped: {}",
        summary.totals.rows_seen,
        summary.totals.inserted.to_string().green(),
        summary.totals.already_present,
        summary.totals.rows_skipped()
    );
}
