//! Application constants for the waves loader
//!
//! This module contains the WLS format markers, the numeric sentinel,
//! the per-column type table, and default values used throughout the
//! application.

// =============================================================================
// WLS Format Markers
// =============================================================================

/// Prefix for structural and metadata lines
pub const MARKER: char = '%';

/// Prefix for comment lines, which are ignored entirely
pub const COMMENT_PREFIX: &str = "%%";

/// Prefix shared by all table-related structural lines; metadata scanning
/// stops at the first occurrence
pub const TABLE_PREFIX: &str = "%Table";

/// Marker opening a table block
pub const TABLE_START_MARKER: &str = "%TableStart";

/// Marker closing a table block
pub const TABLE_END_MARKER: &str = "%TableEnd";

/// Global column declaration line; its tokens name every data column
pub const COLUMN_TYPES_KEY: &str = "%TableColumnTypes:";

/// Key of the per-block range-cell annotation line
pub const RANGE_CELL_KEY: &str = "RangeCell:";

/// Numeric sentinel denoting a missing value in data fields
pub const MISSING_SENTINEL: &str = "999.00";

/// File extension of SeaSonde wave files
pub const WLS_EXTENSION: &str = "wls";

// =============================================================================
// Column Names
// =============================================================================

/// Column names published in SeaSonde WLS files
pub mod columns {
    // Timestamp components
    pub const YEAR: &str = "TYRS";
    pub const MONTH: &str = "TMON";
    pub const DAY: &str = "TDAY";
    pub const HOUR: &str = "THRS";
    pub const MINUTE: &str = "TMIN";
    pub const SECOND: &str = "TSEC";

    // Observation values
    pub const WAVE_HEIGHT: &str = "MWHT";
    pub const WAVE_PERIOD: &str = "MWPD";
    pub const WAVE_DIRECTION: &str = "WAVB";

    // Range-cell grouping column (column-variant files)
    pub const RANGE_CELL: &str = "RCLL";
}

/// Target numeric kind for a typed column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Whole-number column, coerced to i64
    Integer,
    /// Real-valued column, coerced to f64
    Real,
}

/// Fixed table mapping known column names to their numeric kind.
///
/// Columns absent from this table remain raw text and are not used for
/// observations. The table is immutable configuration; callers pass it
/// (or consult it) rather than mutating global state.
pub const COLUMN_KINDS: &[(&str, ColumnKind)] = &[
    ("TIME", ColumnKind::Integer),
    ("MWHT", ColumnKind::Real),
    ("MWPD", ColumnKind::Real),
    ("WAVB", ColumnKind::Real),
    ("WNDB", ColumnKind::Real),
    ("ACNT", ColumnKind::Integer),
    ("DIST", ColumnKind::Real),
    ("RCLL", ColumnKind::Real),
    ("WDPT", ColumnKind::Integer),
    ("MTHD", ColumnKind::Integer),
    ("FLAG", ColumnKind::Integer),
    ("TYRS", ColumnKind::Integer),
    ("TMON", ColumnKind::Integer),
    ("TDAY", ColumnKind::Integer),
    ("THRS", ColumnKind::Integer),
    ("TMIN", ColumnKind::Integer),
    ("TSEC", ColumnKind::Integer),
    ("PMWH", ColumnKind::Real),
    ("LOND", ColumnKind::Real),
    ("LATD", ColumnKind::Real),
];

/// Look up the numeric kind declared for a column name
pub fn column_kind(name: &str) -> Option<ColumnKind> {
    COLUMN_KINDS
        .iter()
        .find(|(col, _)| *col == name)
        .map(|(_, kind)| *kind)
}

// =============================================================================
// Storage Constants
// =============================================================================

/// Timestamp format persisted to the store; seconds are always normalized
/// to `:00` so the stored and compared granularity is minutes
pub const STORED_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:00";

// =============================================================================
// Defaults
// =============================================================================

/// Stations ingested when no explicit list is configured
pub const DEFAULT_STATIONS: &[&str] = &["SILL", "PRIO", "VILA"];

/// Default database filename within the data directory
pub const DEFAULT_DATABASE_FILENAME: &str = "waves.sqlite";

/// Default config filename under the user config directory
pub const CONFIG_DIR_NAME: &str = "waves-loader";
pub const CONFIG_FILENAME: &str = "config.json";
