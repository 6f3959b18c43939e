//! SQLite-backed observation store
//!
//! Schema: a `sites` table mapping station codes to internal keys, and a
//! `wave_values` table holding one row per observation with a unique index
//! on (fk_site, fk_range, datetime). Inserts go through `INSERT OR IGNORE`
//! so the duplicate-key condition maps to the already-present outcome at
//! the application layer rather than surfacing as an error.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::app::models::{SiteId, WaveObservation};
use crate::constants::STORED_DATETIME_FORMAT;
use crate::Result;

use super::{InsertOutcome, ObservationStore};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sites (
    pk   INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS wave_values (
    pk        INTEGER PRIMARY KEY,
    fk_site   INTEGER NOT NULL REFERENCES sites(pk),
    fk_range  INTEGER NOT NULL,
    datetime  TEXT NOT NULL,
    height    REAL NOT NULL,
    period    REAL NOT NULL,
    direction REAL NOT NULL,
    UNIQUE (fk_site, fk_range, datetime)
);
";

/// Embedded SQLite observation store
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if necessary) a store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening observation store at {}", path.display());
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Register a station code, returning its site key. Re-registering an
    /// existing code is a no-op that returns the existing key.
    pub fn add_site(&self, code: &str) -> Result<SiteId> {
        self.conn.execute(
            "INSERT OR IGNORE INTO sites (code) VALUES (?1)",
            params![code],
        )?;

        let pk: i64 = self.conn.query_row(
            "SELECT pk FROM sites WHERE code = ?1",
            params![code],
            |row| row.get(0),
        )?;

        debug!("Site '{}' registered as {}", code, pk);
        Ok(SiteId(pk))
    }

    /// All registered sites as (key, code) pairs, ordered by key
    pub fn sites(&self) -> Result<Vec<(SiteId, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT pk, code FROM sites ORDER BY pk ASC")?;

        let rows = stmt
            .query_map([], |row| Ok((SiteId(row.get(0)?), row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Total number of stored observations
    pub fn observation_count(&self) -> Result<i64> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM wave_values", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl ObservationStore for SqliteStore {
    fn resolve_site(&self, code: &str) -> Result<Option<SiteId>> {
        let pk: Option<i64> = self
            .conn
            .query_row(
                "SELECT pk FROM sites WHERE code = ?1",
                params![code],
                |row| row.get(0),
            )
            .optional()?;
        Ok(pk.map(SiteId))
    }

    fn exists(&self, site: SiteId, range_cell: i64, timestamp: NaiveDateTime) -> Result<bool> {
        let datetime = timestamp.format(STORED_DATETIME_FORMAT).to_string();
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM wave_values
                 WHERE fk_site = ?1 AND fk_range = ?2 AND datetime = ?3",
                params![site.0, range_cell, datetime],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(&self, observation: &WaveObservation) -> Result<InsertOutcome> {
        // Single-statement atomic upsert: the unique triple index resolves
        // duplicates inside the engine, with no read-before-write window.
        let affected = self.conn.execute(
            "INSERT OR IGNORE INTO wave_values
                 (fk_site, fk_range, datetime, height, period, direction)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                observation.site.0,
                observation.range_cell,
                observation.stored_timestamp(),
                observation.height,
                observation.period,
                observation.direction,
            ],
        )?;

        if affected == 0 {
            Ok(InsertOutcome::AlreadyPresent)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 2, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn observation(site: SiteId, range_cell: i64, ts: NaiveDateTime) -> WaveObservation {
        WaveObservation {
            site,
            range_cell,
            timestamp: ts,
            height: 2.41,
            period: 9.0,
            direction: 295.0,
        }
    }

    #[test]
    fn test_site_registration_and_resolution() {
        let store = SqliteStore::open_in_memory().unwrap();

        assert_eq!(store.resolve_site("PRIO").unwrap(), None);

        let id = store.add_site("PRIO").unwrap();
        assert_eq!(store.resolve_site("PRIO").unwrap(), Some(id));

        // Re-registering returns the same key
        assert_eq!(store.add_site("PRIO").unwrap(), id);
        assert_eq!(store.sites().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_then_duplicate_is_already_present() {
        let store = SqliteStore::open_in_memory().unwrap();
        let site = store.add_site("SILL").unwrap();
        let obs = observation(site, 3, timestamp(10, 30));

        assert_eq!(store.insert(&obs).unwrap(), InsertOutcome::Inserted);
        assert_eq!(store.insert(&obs).unwrap(), InsertOutcome::AlreadyPresent);
        assert_eq!(store.observation_count().unwrap(), 1);
    }

    #[test]
    fn test_exists_matches_at_minute_granularity() {
        let store = SqliteStore::open_in_memory().unwrap();
        let site = store.add_site("SILL").unwrap();
        let obs = observation(site, 3, timestamp(10, 30));
        store.insert(&obs).unwrap();

        assert!(store.exists(site, 3, timestamp(10, 30)).unwrap());
        assert!(!store.exists(site, 3, timestamp(10, 31)).unwrap());
        assert!(!store.exists(site, 4, timestamp(10, 30)).unwrap());
        assert!(!store.exists(SiteId(site.0 + 1), 3, timestamp(10, 30)).unwrap());
    }

    #[test]
    fn test_distinct_triples_coexist() {
        let store = SqliteStore::open_in_memory().unwrap();
        let site = store.add_site("VILA").unwrap();

        store.insert(&observation(site, 1, timestamp(10, 0))).unwrap();
        store.insert(&observation(site, 2, timestamp(10, 0))).unwrap();
        store.insert(&observation(site, 1, timestamp(10, 10))).unwrap();

        assert_eq!(store.observation_count().unwrap(), 3);
    }
}
