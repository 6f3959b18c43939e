//! Core WLS decoder implementation
//!
//! Orchestrates the decode of one wave file: the metadata pass over header
//! lines, location of the global column declaration, block extraction, and
//! per-block row decoding with range-cell variant resolution.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::app::models::Row;
use crate::constants::{COLUMN_TYPES_KEY, COMMENT_PREFIX, MARKER, TABLE_PREFIX};
use crate::{Error, Result};

use super::block::{extract_blocks, RangeAssignment, TableBlock};
use super::columns::ColumnMap;
use super::fields::parse_data_line;
use super::stats::DecodeStats;

/// Structured result of decoding one WLS file: global metadata plus a
/// mapping from range-cell id to an ordered table of typed rows.
///
/// May hold zero range cells without being an error; row order within each
/// range-cell table is preserved from source order.
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    /// Header metadata, last-key-wins, not required to be complete
    pub metadata: HashMap<String, String>,

    /// The global column declaration shared by every row
    pub columns: ColumnMap,

    /// Decoded rows grouped by range-cell id
    pub tables: BTreeMap<i64, Vec<Row>>,

    /// Counters and diagnostics accumulated during the decode
    pub stats: DecodeStats,
}

impl DecodedDocument {
    /// Total number of decoded rows across all range cells
    pub fn row_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Range-cell ids present in this document, in ascending order
    pub fn range_cells(&self) -> Vec<i64> {
        self.tables.keys().copied().collect()
    }

    /// Whether the document decoded to zero rows
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Decoder for SeaSonde WLS wave files.
///
/// Decoding never fails for malformed individual rows or blocks; it degrades
/// by omission and diagnostic. The only fatal condition for a file is the
/// absence of the global `%TableColumnTypes:` declaration.
#[derive(Debug, Default)]
pub struct WlsDecoder;

impl WlsDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a WLS file from disk.
    ///
    /// Unreadable bytes within the file are replaced, never fatal to the
    /// whole parse.
    pub fn decode_file(&self, path: &Path) -> Result<DecodedDocument> {
        info!("Decoding WLS file: {}", path.display());

        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;

        let lines: Vec<String> = String::from_utf8_lossy(&bytes)
            .lines()
            .map(|line| line.trim().to_string())
            .collect();

        self.decode_lines(&path.display().to_string(), &lines)
    }

    /// Decode a WLS document from its lines in original order.
    ///
    /// `file_label` names the source in errors and diagnostics.
    pub fn decode_lines(&self, file_label: &str, lines: &[String]) -> Result<DecodedDocument> {
        let metadata = parse_metadata(lines);
        debug!("Extracted {} metadata entries", metadata.len());

        let columns = find_column_declaration(lines)
            .ok_or_else(|| Error::missing_header(file_label))?;
        debug!("Declared columns: {:?}", columns.names());

        let mut stats = DecodeStats::new();
        let mut tables: BTreeMap<i64, Vec<Row>> = BTreeMap::new();

        for block in extract_blocks(lines, &mut stats) {
            decode_block(&block, &columns, &mut tables, &mut stats);
        }

        if stats.has_losses() {
            warn!(
                "Decoded {} with losses: {} blocks and {} rows dropped",
                file_label, stats.blocks_dropped, stats.rows_dropped
            );
        }

        info!(
            "Decoded {} rows across {} range cells from {}",
            stats.rows_decoded,
            tables.len(),
            file_label
        );

        Ok(DecodedDocument {
            metadata,
            columns,
            tables,
            stats,
        })
    }
}

/// Extract header metadata: marker-prefixed lines (not comments) before the
/// first table marker, split on the first colon, trimmed, last-key-wins.
fn parse_metadata(lines: &[String]) -> HashMap<String, String> {
    let mut metadata = HashMap::new();

    for line in lines {
        if line.starts_with(TABLE_PREFIX) {
            break;
        }
        if !line.starts_with(MARKER) || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let stripped = line.trim_matches(MARKER);
        if let Some((key, value)) = stripped.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.trim().to_string());
            }
        }
    }

    metadata
}

/// Locate the global column declaration line anywhere in the document
fn find_column_declaration(lines: &[String]) -> Option<ColumnMap> {
    for line in lines {
        if let Some((_, rest)) = line.split_once(COLUMN_TYPES_KEY) {
            let tokens: Vec<&str> = rest.split_whitespace().collect();
            if !tokens.is_empty() {
                return Some(ColumnMap::from_tokens(tokens));
            }
        }
    }
    None
}

/// Decode one block's data lines into range-cell tables.
///
/// The range-cell variant is resolved once for the whole block; a block with
/// neither an annotation nor a declared RCLL column contributes nothing.
fn decode_block(
    block: &TableBlock,
    columns: &ColumnMap,
    tables: &mut BTreeMap<i64, Vec<Row>>,
    stats: &mut DecodeStats,
) {
    let Some(assignment) = block.resolve_assignment(columns) else {
        stats.blocks_dropped += 1;
        stats.diagnostic(format!(
            "block {}: no range-cell annotation and no {} column; dropped {} data lines",
            block.index,
            crate::constants::columns::RANGE_CELL,
            block.data_lines.len()
        ));
        return;
    };

    for line in &block.data_lines {
        let (row, excess) = parse_data_line(line, columns);
        if excess > 0 {
            stats.diagnostic(format!(
                "block {}: data line carries {} fields beyond the {} declared columns",
                block.index,
                excess,
                columns.len()
            ));
        }

        let range_cell = match assignment {
            RangeAssignment::Annotated(id) => id,
            RangeAssignment::Grouped(idx) => {
                // Range-cell ids are non-negative integers; a fractional
                // grouping value is malformed, never truncated into a cell
                match row.get(idx).and_then(|v| v.as_float()) {
                    Some(v) if v >= 0.0 && v.fract() == 0.0 => v as i64,
                    _ => {
                        stats.rows_dropped += 1;
                        stats.diagnostic(format!(
                            "block {}: row dropped, range cell undetermined",
                            block.index
                        ));
                        continue;
                    }
                }
            }
        };

        tables.entry(range_cell).or_default().push(row);
        stats.rows_decoded += 1;
    }
}
