//! Core observation loading implementation
//!
//! Derives one wave observation per valid decoded row and commits only new
//! observations: the store's unique (site, range cell, timestamp) index
//! resolves duplicates, so re-loading a file is a safe no-op.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::app::models::{Row, SiteId, SkipReason, WaveObservation};
use crate::app::services::store::{InsertOutcome, ObservationStore};
use crate::app::services::wls_decoder::{ColumnMap, DecodedDocument};
use crate::constants::columns;
use crate::{Error, Result};

use super::report::LoadReport;

/// Positional indices of the fields an observation is derived from.
///
/// Resolved once per document against the global column declaration; a
/// column missing from the declaration reads as null for every row.
#[derive(Debug, Clone, Copy)]
struct FieldIndices {
    year: Option<usize>,
    month: Option<usize>,
    day: Option<usize>,
    hour: Option<usize>,
    minute: Option<usize>,
    second: Option<usize>,
    height: Option<usize>,
    period: Option<usize>,
    direction: Option<usize>,
}

impl FieldIndices {
    fn resolve(columns: &ColumnMap) -> Self {
        Self {
            year: columns.index_of(columns::YEAR),
            month: columns.index_of(columns::MONTH),
            day: columns.index_of(columns::DAY),
            hour: columns.index_of(columns::HOUR),
            minute: columns.index_of(columns::MINUTE),
            second: columns.index_of(columns::SECOND),
            height: columns.index_of(columns::WAVE_HEIGHT),
            period: columns.index_of(columns::WAVE_PERIOD),
            direction: columns.index_of(columns::WAVE_DIRECTION),
        }
    }
}

/// Loader committing decoded wave documents to an observation store
#[derive(Debug, Default)]
pub struct WaveLoader;

impl WaveLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self
    }

    /// Load a decoded document for the named station.
    ///
    /// Fails with [`Error::UnknownSite`] before any write when the code is
    /// not registered. Row-level problems are tallied in the returned
    /// [`LoadReport`], never raised.
    pub fn load<S: ObservationStore>(
        &self,
        site_code: &str,
        decoded: &DecodedDocument,
        store: &S,
    ) -> Result<LoadReport> {
        let site = store
            .resolve_site(site_code)?
            .ok_or_else(|| Error::unknown_site(site_code))?;

        info!(
            "Loading {} rows across {} range cells for site '{}' ({})",
            decoded.row_count(),
            decoded.tables.len(),
            site_code,
            site
        );

        let indices = FieldIndices::resolve(&decoded.columns);
        let mut report = LoadReport::new();

        for (&range_cell, rows) in &decoded.tables {
            for row in rows {
                report.rows_seen += 1;

                let observation = match derive_observation(site, range_cell, row, indices) {
                    Ok(observation) => observation,
                    Err(reason) => {
                        debug!(
                            "Skipped row in range cell {}: {}",
                            range_cell, reason
                        );
                        report.record_skip(reason);
                        continue;
                    }
                };

                match store.insert(&observation)? {
                    InsertOutcome::Inserted => report.inserted += 1,
                    InsertOutcome::AlreadyPresent => report.already_present += 1,
                }
            }
        }

        info!("Load complete for '{}': {}", site_code, report);
        Ok(report)
    }
}

/// Derive a candidate observation from one decoded row.
///
/// The timestamp requires all six integer fields forming a valid calendar
/// date/time; seconds are validated, then normalized to `:00` so persisted
/// granularity is minutes. The three value fields must all be present.
fn derive_observation(
    site: SiteId,
    range_cell: i64,
    row: &Row,
    indices: FieldIndices,
) -> std::result::Result<WaveObservation, SkipReason> {
    let timestamp = derive_timestamp(row, indices).ok_or(SkipReason::InvalidTimestamp)?;

    let float_at = |index: Option<usize>| {
        index
            .and_then(|i| row.get(i))
            .and_then(|value| value.as_float())
    };

    let height = float_at(indices.height).ok_or(SkipReason::InvalidValue)?;
    let period = float_at(indices.period).ok_or(SkipReason::InvalidValue)?;
    let direction = float_at(indices.direction).ok_or(SkipReason::InvalidValue)?;

    Ok(WaveObservation {
        site,
        range_cell,
        timestamp,
        height,
        period,
        direction,
    })
}

/// Build the minute-truncated timestamp from the six source fields.
///
/// Source seconds are parsed and must be valid (0..=59), but are not
/// retained: the stored granularity is deliberately lossy at minutes.
fn derive_timestamp(row: &Row, indices: FieldIndices) -> Option<NaiveDateTime> {
    let int_at = |index: Option<usize>| {
        index
            .and_then(|i| row.get(i))
            .and_then(|value| value.as_int())
    };

    let year = i32::try_from(int_at(indices.year)?).ok()?;
    let month = u32::try_from(int_at(indices.month)?).ok()?;
    let day = u32::try_from(int_at(indices.day)?).ok()?;
    let hour = u32::try_from(int_at(indices.hour)?).ok()?;
    let minute = u32::try_from(int_at(indices.minute)?).ok()?;
    let second = u32::try_from(int_at(indices.second)?).ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    // Validate the full time, seconds included, before truncating
    date.and_hms_opt(hour, minute, second)?;
    date.and_hms_opt(hour, minute, 0)
}
