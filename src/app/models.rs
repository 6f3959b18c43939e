//! Data models for WLS decoding and wave observation loading
//!
//! This module contains the core data structures shared between the format
//! decoder and the observation loader: typed field values, decoded rows,
//! and the persisted wave observation.

use crate::constants::STORED_DATETIME_FORMAT;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =============================================================================
// Typed Field Values
// =============================================================================

/// A single decoded data field.
///
/// Numeric parsing failures and the `999.00` sentinel both produce `Null`
/// rather than discarding the row. Columns outside the known type table are
/// carried as `Text` and never used for observations.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Whole-number value from an integer-typed column
    Int(i64),
    /// Real value from a float-typed column
    Float(f64),
    /// Raw text from a column outside the type table
    Text(String),
    /// Missing, sentinel, or unparseable value
    Null,
}

impl FieldValue {
    /// Get the integer value, if this field holds one
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the float value, accepting integer fields as exact floats
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Check whether this field is missing
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

// =============================================================================
// Decoded Row
// =============================================================================

/// One decoded data row.
///
/// Fields are positional against the document's global column list; every
/// row within one decoded document shares the same declared columns in
/// declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Field values aligned to the declared column order
    pub fields: Vec<FieldValue>,
}

impl Row {
    /// Create a row from positional field values
    pub fn new(fields: Vec<FieldValue>) -> Self {
        Self { fields }
    }

    /// Get a field by positional index
    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index)
    }
}

// =============================================================================
// Site Identifier
// =============================================================================

/// Store-assigned key identifying a radar installation.
///
/// Stations are identified externally by a short code (e.g. "PRIO");
/// the store resolves codes to this internal key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteId(pub i64);

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Wave Observation
// =============================================================================

/// The unit persisted to storage: one (height, period, direction) triple at
/// a given site, range cell, and timestamp.
///
/// Uniquely identified by (site, range_cell, timestamp); the loader never
/// creates two observations sharing this triple. Never mutated once created.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveObservation {
    /// Internal site key
    pub site: SiteId,

    /// Discretized distance bin from the radar station
    pub range_cell: i64,

    /// Observation timestamp, truncated to minute granularity
    pub timestamp: NaiveDateTime,

    /// Significant wave height in meters (MWHT)
    pub height: f64,

    /// Wave period in seconds (MWPD)
    pub period: f64,

    /// Wave bearing in degrees (WAVB)
    pub direction: f64,
}

impl WaveObservation {
    /// Format the timestamp the way it is persisted and compared, with
    /// seconds normalized to `:00`
    pub fn stored_timestamp(&self) -> String {
        self.timestamp.format(STORED_DATETIME_FORMAT).to_string()
    }
}

// =============================================================================
// Row Skip Reasons
// =============================================================================

/// Reason category for a data row dropped during loading.
///
/// Row-level problems are recovered locally and surfaced only as counters;
/// they are never raised as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// One of the six timestamp fields was null, or the fields do not form
    /// a valid calendar date/time
    InvalidTimestamp,
    /// One of the three observation values (height, period, direction)
    /// was null
    InvalidValue,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::InvalidTimestamp => write!(f, "invalid timestamp"),
            SkipReason::InvalidValue => write!(f, "invalid value"),
        }
    }
}
