//! Header resolution.

use crate::error::SchemaFailure;
use crate::types::{ColumnIndex, Results};

use super::{CHARACTERISTIC_COLUMN, REQUIRED_COLUMNS, RESULT_COLUMN};

/// Positions of the required columns in every data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Position of [`CHARACTERISTIC_COLUMN`].
    pub characteristic: usize,
    /// Position of [`RESULT_COLUMN`].
    pub result: usize,
}

/// Resolve the header row into `results.column_index` and check the required columns.
///
/// Every header field is indexed (last duplicate wins). For each missing required column a
/// `Missing required column: <name>.` error is appended, in declaration order, and a
/// [`SchemaFailure`] is returned. Callers must not record another error for that failure.
pub fn resolve_schema(
    results: &mut Results,
    header: &[String],
) -> Result<ResolvedColumns, SchemaFailure> {
    results.column_index = ColumnIndex::from_header(header);

    match (
        results.column_index.get(CHARACTERISTIC_COLUMN),
        results.column_index.get(RESULT_COLUMN),
    ) {
        (Some(characteristic), Some(result)) => Ok(ResolvedColumns {
            characteristic,
            result,
        }),
        _ => {
            let missing: Vec<&'static str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|column| !results.column_index.contains(column))
                .collect();
            results
                .errors
                .extend(missing.iter().map(|column| missing_column_message(column)));
            Err(SchemaFailure { missing })
        }
    }
}

pub(crate) fn missing_column_message(column: &str) -> String {
    format!("Missing required column: {column}.")
}

#[cfg(test)]
mod tests {
    use super::{resolve_schema, ResolvedColumns};
    use crate::aggregate::{CHARACTERISTIC_COLUMN, RESULT_COLUMN};
    use crate::types::Results;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_required_columns_in_any_order() {
        let mut results = Results::begin();
        let cols = resolve_schema(
            &mut results,
            &header(&["MonitoringLocationID", RESULT_COLUMN, CHARACTERISTIC_COLUMN]),
        )
        .unwrap();

        assert_eq!(
            cols,
            ResolvedColumns {
                characteristic: 2,
                result: 1
            }
        );
        assert_eq!(results.column_index.len(), 3);
        assert_eq!(results.column_index.get("MonitoringLocationID"), Some(0));
        assert!(results.errors.is_empty());
    }

    #[test]
    fn reports_one_error_per_missing_column_in_declaration_order() {
        let mut results = Results::begin();
        let failure = resolve_schema(&mut results, &header(&["Unrelated"])).unwrap_err();

        assert_eq!(failure.missing, vec![CHARACTERISTIC_COLUMN, RESULT_COLUMN]);
        assert_eq!(
            results.errors,
            vec![
                "Missing required column: CharacteristicName.".to_string(),
                "Missing required column: ResultValue.".to_string(),
            ]
        );
    }

    #[test]
    fn missing_result_column_only() {
        let mut results = Results::begin();
        let failure = resolve_schema(&mut results, &header(&[CHARACTERISTIC_COLUMN])).unwrap_err();

        assert_eq!(failure.missing, vec![RESULT_COLUMN]);
        assert_eq!(
            results.errors,
            vec!["Missing required column: ResultValue.".to_string()]
        );
        // The partial index is still recorded.
        assert_eq!(results.column_index.get(CHARACTERISTIC_COLUMN), Some(0));
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let mut results = Results::begin();
        let failure =
            resolve_schema(&mut results, &header(&["characteristicname", "resultvalue"])).unwrap_err();
        assert_eq!(failure.missing.len(), 2);
    }

    #[test]
    fn duplicate_header_names_bind_to_last_position() {
        let mut results = Results::begin();
        let cols = resolve_schema(
            &mut results,
            &header(&[RESULT_COLUMN, CHARACTERISTIC_COLUMN, RESULT_COLUMN]),
        )
        .unwrap();
        assert_eq!(cols.result, 2);
        assert_eq!(cols.characteristic, 1);
    }
}
