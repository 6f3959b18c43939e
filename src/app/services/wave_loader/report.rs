//! Load reporting
//!
//! Tallies what happened to every decoded row during a load call. Row-level
//! problems surface only here, never as errors.

use crate::app::models::SkipReason;

/// Outcome tally for one load call (or a merged batch of calls)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Decoded rows offered to the loader
    pub rows_seen: usize,

    /// Observations newly committed to the store
    pub inserted: usize,

    /// Candidates whose triple was already stored; left untouched
    pub already_present: usize,

    /// Rows skipped because the six timestamp fields were null or did not
    /// form a valid calendar date/time
    pub skipped_invalid_timestamp: usize,

    /// Rows skipped because height, period, or direction was null
    pub skipped_invalid_value: usize,
}

impl LoadReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped row under its reason category
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::InvalidTimestamp => self.skipped_invalid_timestamp += 1,
            SkipReason::InvalidValue => self.skipped_invalid_value += 1,
        }
    }

    /// Total rows skipped across all reason categories
    pub fn rows_skipped(&self) -> usize {
        self.skipped_invalid_timestamp + self.skipped_invalid_value
    }

    /// Fold another report into this one, for batch summaries
    pub fn merge(&mut self, other: &LoadReport) {
        self.rows_seen += other.rows_seen;
        self.inserted += other.inserted;
        self.already_present += other.already_present;
        self.skipped_invalid_timestamp += other.skipped_invalid_timestamp;
        self.skipped_invalid_value += other.skipped_invalid_value;
    }
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows: {} inserted, {} already present, {} skipped ({} bad timestamp, {} bad value)",
            self.rows_seen,
            self.inserted,
            self.already_present,
            self.rows_skipped(),
            self.skipped_invalid_timestamp,
            self.skipped_invalid_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_skip_routes_by_reason() {
        let mut report = LoadReport::new();
        report.record_skip(SkipReason::InvalidTimestamp);
        report.record_skip(SkipReason::InvalidValue);
        report.record_skip(SkipReason::InvalidValue);

        assert_eq!(report.skipped_invalid_timestamp, 1);
        assert_eq!(report.skipped_invalid_value, 2);
        assert_eq!(report.rows_skipped(), 3);
    }

    #[test]
    fn test_merge_sums_all_counters() {
        let mut a = LoadReport {
            rows_seen: 5,
            inserted: 3,
            already_present: 1,
            skipped_invalid_timestamp: 1,
            skipped_invalid_value: 0,
        };
        let b = LoadReport {
            rows_seen: 2,
            inserted: 0,
            already_present: 2,
            skipped_invalid_timestamp: 0,
            skipped_invalid_value: 0,
        };

        a.merge(&b);
        assert_eq!(a.rows_seen, 7);
        assert_eq!(a.inserted, 3);
        assert_eq!(a.already_present, 3);
    }
}
