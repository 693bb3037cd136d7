//! Per-row accumulation.

use crate::error::{AggregationError, AggregationResult};
use crate::types::Results;

use super::numeric::parse_decimal;
use super::schema::ResolvedColumns;
use super::{CHARACTERISTIC_COLUMN, RESULT_COLUMN, TARGET_CHARACTERISTIC};

/// Fold one data row into `results`.
///
/// `row_number` is the 1-based ordinal among data rows (the first row after the header is 1);
/// it only appears in warning text.
///
/// - Rows whose characteristic is not exactly [`TARGET_CHARACTERISTIC`] are ignored.
/// - A non-numeric result value appends a warning and leaves the accumulators alone.
/// - Any finite number is added to `sum` and counted.
///
/// Returns [`AggregationError::RowTooShort`] if the row lacks a position the schema points at.
pub fn accumulate(
    mut results: Results,
    columns: ResolvedColumns,
    row: &[String],
    row_number: usize,
) -> AggregationResult<Results> {
    let characteristic = field(row, columns.characteristic, CHARACTERISTIC_COLUMN, row_number)?;
    if characteristic != TARGET_CHARACTERISTIC {
        return Ok(results);
    }

    let raw = field(row, columns.result, RESULT_COLUMN, row_number)?;
    match parse_decimal(raw) {
        Some(value) => {
            results.count += 1;
            results.sum += value;
        }
        None => results
            .warnings
            .push(non_numeric_message(row_number, RESULT_COLUMN, raw)),
    }

    Ok(results)
}

fn field<'a>(
    row: &'a [String],
    position: usize,
    column: &str,
    row_number: usize,
) -> AggregationResult<&'a str> {
    row.get(position)
        .map(String::as_str)
        .ok_or_else(|| AggregationError::RowTooShort {
            row: row_number,
            column: column.to_owned(),
            position,
            width: row.len(),
        })
}

// The trailing space is part of the published message format.
pub(crate) fn non_numeric_message(row_number: usize, column: &str, raw: &str) -> String {
    format!("Row {row_number} has a non-numeric {column}: {raw} ")
}
