//! Table block extraction and range-cell variant resolution
//!
//! A WLS document holds one or more `%TableStart` … `%TableEnd` blocks.
//! Blocks do not nest. Each block carries at most one explicit range-cell
//! annotation and zero or more data lines; how its rows map to range cells
//! is resolved once per block, never mixed within a block.

use tracing::debug;

use crate::constants::{COMMENT_PREFIX, MARKER, RANGE_CELL_KEY, TABLE_END_MARKER, TABLE_START_MARKER};

use super::columns::ColumnMap;
use super::stats::DecodeStats;

/// How a block's rows map to range cells.
///
/// The two format variants are mutually exclusive and tried in this order:
/// an explicit annotation wins; otherwise rows group by the declared RCLL
/// column; a block with neither contributes no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAssignment {
    /// Every row in the block belongs to this annotated range cell
    Annotated(i64),
    /// Rows group by the value of the RCLL column at this positional index
    Grouped(usize),
}

/// One contiguous span of lines between a start and end marker.
///
/// Intermediate unit only: consumed during decoding and discarded.
#[derive(Debug, Clone)]
pub struct TableBlock {
    /// Ordinal of this block within the file, for diagnostics
    pub index: usize,

    /// Explicit range-cell annotation, when the block carries one
    pub annotation: Option<i64>,

    /// Data lines (not marker-prefixed), in source order
    pub data_lines: Vec<String>,
}

impl TableBlock {
    /// Resolve the range-cell variant for this block against the declared
    /// columns. `None` means the block cannot contribute rows.
    pub fn resolve_assignment(&self, columns: &ColumnMap) -> Option<RangeAssignment> {
        if let Some(id) = self.annotation {
            Some(RangeAssignment::Annotated(id))
        } else {
            columns.range_cell_index().map(RangeAssignment::Grouped)
        }
    }
}

/// Extract table blocks by scanning for start/end marker pairs.
///
/// An unterminated block (start without matching end) is discarded with a
/// diagnostic; its lines never become rows.
pub fn extract_blocks(lines: &[String], stats: &mut DecodeStats) -> Vec<TableBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<TableBlock> = None;

    for line in lines {
        if line.starts_with(TABLE_START_MARKER) {
            if let Some(block) = current.take() {
                drop_unterminated(block, stats);
            }
            stats.blocks_seen += 1;
            current = Some(TableBlock {
                index: stats.blocks_seen,
                annotation: None,
                data_lines: Vec::new(),
            });
            continue;
        }

        if line.starts_with(TABLE_END_MARKER) {
            if let Some(block) = current.take() {
                debug!(
                    "Block {}: annotation={:?}, {} data lines",
                    block.index,
                    block.annotation,
                    block.data_lines.len()
                );
                blocks.push(block);
            }
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };

        if line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        if line.starts_with(MARKER) {
            if let Some(value) = parse_annotation(line) {
                // Last annotation wins, matching historical decoder behavior
                block.annotation = Some(value);
            }
            continue;
        }

        if !line.trim().is_empty() {
            block.data_lines.push(line.clone());
        }
    }

    if let Some(block) = current {
        drop_unterminated(block, stats);
    }

    blocks
}

/// Record an unterminated block, whether it ran into the end of the file or
/// was displaced by the next start marker.
fn drop_unterminated(block: TableBlock, stats: &mut DecodeStats) {
    stats.blocks_dropped += 1;
    stats.diagnostic(format!(
        "block {} has no {} marker; dropped {} data lines",
        block.index,
        TABLE_END_MARKER,
        block.data_lines.len()
    ));
}

/// Parse a range-cell annotation line, returning its non-negative id.
///
/// Lines that name the key but carry no parseable non-negative integer are
/// treated as absent annotations.
fn parse_annotation(line: &str) -> Option<i64> {
    let (_, rest) = line.split_once(RANGE_CELL_KEY)?;
    rest.trim().parse::<i64>().ok().filter(|id| *id >= 0)
}
