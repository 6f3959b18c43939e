//! SeaSonde Waves Loader Library
//!
//! A Rust library for ingesting CODAR SeaSonde wave measurement files (WLS)
//! from coastal HF radar stations into a relational store.
//!
//! This library provides tools for:
//! - Decoding the SeaSonde WLS text format, including both historical layouts
//!   (per-block range-cell annotations and the RCLL grouping column)
//! - Normalizing heterogeneous text fields into typed values with sentinel handling
//! - Deriving one timestamped wave observation per valid data row
//! - Idempotent loading against a store with a unique (site, range cell, time) triple
//! - Local discovery of fetched `.wls` files per station

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod store;
        pub mod wave_loader;
        pub mod wls_decoder;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldValue, SiteId, SkipReason, WaveObservation};
pub use app::services::store::{InsertOutcome, ObservationStore, SqliteStore};
pub use app::services::wave_loader::{LoadReport, WaveLoader};
pub use app::services::wls_decoder::{DecodedDocument, WlsDecoder};
pub use config::Config;

/// Result type alias for the waves loader
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for WLS decoding and observation loading
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The mandatory %TableColumnTypes header line is absent; the file
    /// cannot be decoded at all
    #[error("Missing %TableColumnTypes header in file '{file}'")]
    MissingHeader { file: String },

    /// The station code does not resolve to a registered site
    #[error("Unknown site: '{code}' is not registered in the store")]
    UnknownSite { code: String },

    /// Store operation failed (connectivity, schema, statement)
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a missing-header error for a file
    pub fn missing_header(file: impl Into<String>) -> Self {
        Self::MissingHeader { file: file.into() }
    }

    /// Create an unknown-site error
    pub fn unknown_site(code: impl Into<String>) -> Self {
        Self::UnknownSite { code: code.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
