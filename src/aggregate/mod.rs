//! Single-pass aggregation of water temperature observations.
//!
//! [`run`] treats the first row of a [`RawTable`](crate::types::RawTable) as the header, resolves the required columns
//! from it, then folds every data row into a [`Results`] accumulator:
//!
//! - [`resolve_schema()`]: header → column positions, or a [`SchemaFailure`] that stops the pass
//! - [`accumulate()`]: one data row → updated accumulator (possibly with a warning)
//! - [`parse_decimal()`]: the strict number parser used for result values
//!
//! ## Example
//!
//! ```rust
//! use water_temperature_stats::aggregate::run;
//!
//! let table: Vec<Vec<String>> = [
//!     ["CharacteristicName", "ResultValue"],
//!     ["Temperature, water", "3"],
//!     ["Temperature, water", "5"],
//!     ["pH", "7.2"],
//! ]
//! .iter()
//! .map(|row| row.iter().map(|s| s.to_string()).collect())
//! .collect();
//!
//! let results = run(&table).unwrap();
//! assert_eq!(results.average, Some(4.0));
//! assert!(results.errors.is_empty());
//! assert!(results.warnings.is_empty());
//! ```

pub mod accumulate;
pub mod numeric;
pub mod schema;

pub use accumulate::accumulate;
pub use numeric::parse_decimal;
pub use schema::{resolve_schema, ResolvedColumns};

use crate::error::{AggregationResult, SchemaFailure};
use crate::types::{Row, Results};

/// Header name of the column holding the observed characteristic.
pub const CHARACTERISTIC_COLUMN: &str = "CharacteristicName";

/// Header name of the column holding the measured value.
pub const RESULT_COLUMN: &str = "ResultValue";

/// Columns that must be present in the header, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 2] = [CHARACTERISTIC_COLUMN, RESULT_COLUMN];

/// Characteristic value selecting the rows that are averaged.
pub const TARGET_CHARACTERISTIC: &str = "Temperature, water";

/// Warning recorded when no row contributed a value.
pub const NO_DATA_WARNING: &str = "No water temperature data found.";

/// Compute the average water temperature of a decoded table.
///
/// Row 0 is the header; all further rows are data. The returned [`Results`] is complete on every
/// data-quality path:
///
/// | input                                   | errors            | warnings        | average |
/// |-----------------------------------------|-------------------|-----------------|---------|
/// | empty table                             |                   | no data         | `None`  |
/// | header missing required column(s)       | one per column    |                 | `None`  |
/// | valid header, nothing matches           |                   | no data         | `None`  |
/// | valid header, all matching rows numeric |                   |                 | mean    |
/// | valid header, some non-numeric          |                   | one per bad row | mean of valid rows |
///
/// Once the header is rejected no data row is looked at.
///
/// `Err` is reserved for contract violations by the decoder (see
/// [`crate::AggregationError::RowTooShort`]).
pub fn run(table: &[Row]) -> AggregationResult<Results> {
    let mut results = Results::begin();

    let Some((header, rows)) = table.split_first() else {
        return Ok(finish(results));
    };

    let columns = match resolve_schema(&mut results, header) {
        Ok(columns) => columns,
        // Errors are already recorded.
        Err(SchemaFailure { .. }) => return Ok(results),
    };

    let results = rows
        .iter()
        .enumerate()
        .try_fold(results, |acc, (idx, row)| accumulate(acc, columns, row, idx + 1))?;

    Ok(finish(results))
}

fn finish(mut results: Results) -> Results {
    if results.count > 0 {
        results.average = Some(results.sum / results.count as f64);
    } else {
        results.warnings.push(NO_DATA_WARNING.to_string());
    }
    results
}
