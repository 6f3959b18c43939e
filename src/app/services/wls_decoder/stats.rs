//! Decoding statistics and diagnostics
//!
//! Malformed blocks and rows never abort a parse; they are dropped and
//! surfaced here as counters and diagnostic messages for the caller.

/// Counters and diagnostics accumulated during one decode
#[derive(Debug, Clone, Default)]
pub struct DecodeStats {
    /// Table blocks found in the file
    pub blocks_seen: usize,

    /// Blocks dropped (unterminated, or no way to determine a range cell)
    pub blocks_dropped: usize,

    /// Data rows decoded into a range-cell table
    pub rows_decoded: usize,

    /// Rows dropped (null grouping value in a column-variant block)
    pub rows_dropped: usize,

    /// Human-readable diagnostics for dropped blocks and rows
    pub diagnostics: Vec<String>,
}

impl DecodeStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic message
    pub fn diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics.push(message.into());
    }

    /// Whether anything was dropped during decoding
    pub fn has_losses(&self) -> bool {
        self.blocks_dropped > 0 || self.rows_dropped > 0
    }
}
