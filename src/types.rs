//! Core data model types for aggregation.
//!
//! The engine consumes a [`RawTable`] (rows of text fields, header first) and produces a
//! [`Results`] record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single decoded row: ordered text fields, no structure beyond position.
pub type Row = Vec<String>;

/// A decoded table. Row 0 is the header; the remaining rows are data.
pub type RawTable = Vec<Row>;

/// Mapping from header name to zero-based field position.
///
/// Names are matched exactly (case-sensitive). When a header repeats a name, the last
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnIndex {
    positions: BTreeMap<String, usize>,
}

impl ColumnIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a header row, left to right.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let positions = header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_ref().to_owned(), idx))
            .collect();
        Self { positions }
    }

    /// Returns the position of a column by name, if present.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Returns `true` if the header named this column.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Number of distinct column names.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no columns have been resolved.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate `(name, position)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.positions.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Output of one aggregation run.
///
/// `errors` holds header-level problems (the average is then always undefined); `warnings`
/// holds row-level problems and the "no data" notice. `count` and `sum` are the running
/// accumulators the average is derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    /// Arithmetic mean of contributing values; `None` unless `count > 0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    /// Column positions resolved from the header row.
    pub column_index: ColumnIndex,
    /// Number of rows that contributed a value.
    pub count: usize,
    /// Total of the contributing values.
    pub sum: f64,
    /// Fatal, header-level diagnostics.
    pub errors: Vec<String>,
    /// Non-fatal, row-level diagnostics.
    pub warnings: Vec<String>,
}

impl Results {
    /// A fresh result: zeroed accumulators, no messages, no average.
    pub fn begin() -> Self {
        Self::default()
    }

    /// A fresh result carrying a single error message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            ..Self::begin()
        }
    }

    /// Returns `true` if any header-level error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Serialize for a presentation layer (camelCase keys, `average` omitted when undefined).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
