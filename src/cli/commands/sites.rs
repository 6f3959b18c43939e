//! Sites command implementation
//!
//! Site resolution requires station codes to be registered before any
//! ingest; this command lists what the store knows and registers new
//! codes.

use colored::Colorize;
use tracing::info;

use crate::app::services::store::SqliteStore;
use crate::cli::args::SitesArgs;
use crate::config::Config;
use crate::{Error, Result};

use super::shared::{setup_logging, BatchSummary};

/// Run the sites workflow
pub fn run_sites(args: SitesArgs) -> Result<BatchSummary> {
    args.validate()?;
    setup_logging(args.get_log_level(), false)?;

    let config = Config::load(args.config_file.as_deref())?;
    let database_path = args.database.unwrap_or(config.database_path);

    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("Failed to create {}", parent.display()), e))?;
        }
    }

    let store = SqliteStore::open(&database_path)?;

    if let Some(code) = &args.add {
        let id = store.add_site(code)?;
        info!("Registered site '{}' as {}", code, id);
        println!("{} {} -> {}", "registered".green().bold(), code, id);
    }

    let sites = store.sites()?;
    if sites.is_empty() {
        println!("No sites registered in {}", database_path.display());
    } else {
        println!("{}", "Registered sites".bold());
        for (id, code) in &sites {
            println!("  {:>4}  {}", id.to_string(), code);
        }
    }

    Ok(BatchSummary::default())
}
