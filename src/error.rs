use thiserror::Error;

/// Convenience result type for aggregation and upload operations.
pub type AggregationResult<T> = Result<T, AggregationError>;

/// Error type returned when aggregation cannot complete.
///
/// Data-quality problems never show up here: they are reported as messages in
/// [`crate::types::Results`]. This enum only carries failures of the surrounding
/// machinery (I/O, the CSV decoder) and contract violations that point at a bug.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV decoder rejected the input.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row is narrower than the resolved schema requires.
    ///
    /// The decoder guarantees rectangular tables, so this is a contract violation rather than a
    /// data-quality issue.
    #[error("row {row} has {width} fields but column '{column}' is at position {position}")]
    RowTooShort {
        row: usize,
        column: String,
        position: usize,
        width: usize,
    },
}

/// The header row does not contain every required column.
///
/// Produced by [`crate::aggregate::resolve_schema`] after the matching
/// `Missing required column` messages have already been appended to the results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required columns: {missing:?}")]
pub struct SchemaFailure {
    /// Missing column names, in declaration order.
    pub missing: Vec<&'static str>,
}
