//! Global column declaration handling
//!
//! A WLS file declares its data columns once, in a single
//! `%TableColumnTypes:` line whose whitespace-separated tokens name every
//! column of every table block in the document. This module provides the
//! indexed view of that declaration used when aligning data fields.

use crate::constants::columns;
use std::collections::HashMap;

/// Indexed view of the global column declaration.
///
/// Preserves declared order for positional field alignment and offers O(1)
/// name lookups for the loader's fixed field set.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    /// Column names in declared order
    names: Vec<String>,

    /// Column name to positional index
    index: HashMap<String, usize>,
}

impl ColumnMap {
    /// Build a column map from the tokens of the declaration line
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    /// Get the positional index of a column by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Check whether a column is declared
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column names in declared order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of declared columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no columns are declared
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Positional index of the range-cell grouping column, when declared
    pub fn range_cell_index(&self) -> Option<usize> {
        self.index_of(columns::RANGE_CELL)
    }
}
