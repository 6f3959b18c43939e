//! Persistent observation store
//!
//! The loader talks to storage through the [`ObservationStore`] trait:
//! site-code resolution, an existence probe, and an idempotent insert.
//! The shipped implementation is an embedded SQLite database whose unique
//! index on (site, range cell, timestamp) enforces the no-duplicate
//! invariant regardless of check-then-act races between concurrent loaders.

pub mod sqlite;

pub use sqlite::SqliteStore;

use chrono::NaiveDateTime;

use crate::app::models::{SiteId, WaveObservation};
use crate::Result;

/// Outcome of an idempotent insert attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The observation was new and has been committed
    Inserted,
    /// An observation with the same (site, range cell, timestamp) triple
    /// already exists; the stored row is left untouched. Normal steady
    /// state, not a fault.
    AlreadyPresent,
}

/// Storage boundary for wave observations.
///
/// `insert` must behave atomically per candidate: two concurrent loaders
/// offering the same triple must never both commit it.
pub trait ObservationStore {
    /// Resolve a station code to its internal site key, if registered
    fn resolve_site(&self, code: &str) -> Result<Option<SiteId>>;

    /// Check whether an observation exists for the triple. Timestamps
    /// compare at minute granularity.
    fn exists(&self, site: SiteId, range_cell: i64, timestamp: NaiveDateTime) -> Result<bool>;

    /// Insert an observation unless its triple is already present
    fn insert(&self, observation: &WaveObservation) -> Result<InsertOutcome>;
}
