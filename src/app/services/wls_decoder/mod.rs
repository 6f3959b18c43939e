//! SeaSonde WLS format decoder
//!
//! This module decodes the vendor wave-data text format into a structured
//! document: global metadata plus a mapping from range-cell identifier to an
//! ordered table of typed rows. It handles the two incompatible historical
//! layouts of the format (explicit per-block range-cell annotations and the
//! implicit RCLL grouping column) and degrades by omission on malformed
//! blocks and rows rather than failing the whole parse.

pub mod block;
pub mod columns;
pub mod decoder;
pub mod fields;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use block::{RangeAssignment, TableBlock};
pub use columns::ColumnMap;
pub use decoder::{DecodedDocument, WlsDecoder};
pub use stats::DecodeStats;
