//! Deduplicating wave observation loader
//!
//! Consumes a decoded WLS document plus a station code, resolves the
//! station to an internal site key, derives one observation per valid row,
//! and performs an idempotent insert against the persistent store. Row
//! problems are counted and skipped; only unknown-site and store failures
//! are fatal to a load call.

pub mod loader;
pub mod report;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use loader::WaveLoader;
pub use report::LoadReport;
