//! Upload entrypoints.
//!
//! Most callers should use [`handle_upload`], which takes the selected file(s), enforces the size
//! cap, decodes the first file as CSV and runs [`crate::aggregate::run`] on it.
//!
//! Problems the user can act on (no file, oversized file, undecodable CSV, a decoder contract
//! violation) come back as messages inside [`Results::errors`]; only I/O failures surface as `Err`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::aggregate;
use crate::error::{AggregationError, AggregationResult};
use crate::types::{RawTable, Results};

use super::decode::decode_table;
use super::observability::{UploadContext, UploadObserver, UploadSeverity, UploadStats};

/// Default upload size cap: 1 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

/// Error recorded when no file was supplied.
pub const NO_FILE_ERROR: &str = "No file provided.";

/// Error recorded when the payload cannot be decoded as CSV.
pub const INVALID_CSV_ERROR: &str = "Invalid CSV File.";

/// Error recorded when aggregation fails for a reason other than data quality.
pub const UNEXPECTED_ERROR: &str = "Unexpected error processing file.";

/// Warning recorded when more than one file was supplied.
pub const EXTRA_FILES_WARNING: &str = "Only the first file has been processed.";

/// Options controlling upload handling.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct UploadOptions {
    /// Largest payload (in bytes) that will be decoded.
    pub max_bytes: u64,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn UploadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: UploadSeverity,
}

impl fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadOptions")
            .field("max_bytes", &self.max_bytes)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            observer: None,
            alert_at_or_above: UploadSeverity::Critical,
        }
    }
}

/// Message recorded when a payload exceeds `max_bytes`.
pub fn too_large_message(max_bytes: u64) -> String {
    format!(
        "File is too large to process. Maximum allowed size is {:.1} MB.",
        max_bytes as f64 / (1024.0 * 1024.0)
    )
}

/// Aggregate the first of the selected files.
///
/// - No paths → `errors = ["No file provided."]`.
/// - First file larger than `options.max_bytes` → a size error; the file is not read.
/// - Undecodable CSV → `errors = ["Invalid CSV File."]`.
/// - A decoder contract violation during aggregation → `errors = ["Unexpected error processing file."]`.
/// - More than one path → the first is processed and a warning notes the rest were skipped.
///
/// When an observer is configured, failures are reported with a computed severity and
/// `on_alert` fires when that severity is >= `options.alert_at_or_above`.
///
/// # Errors
///
/// Returns [`AggregationError::Io`] if the first file cannot be inspected or read.
///
/// # Example
///
/// ```no_run
/// use water_temperature_stats::upload::{handle_upload, UploadOptions};
///
/// # fn main() -> Result<(), water_temperature_stats::AggregationError> {
/// let results = handle_upload(&["observations.csv"], &UploadOptions::default())?;
/// match results.average {
///     Some(avg) => println!("average water temperature: {avg}"),
///     None => println!("errors={:?} warnings={:?}", results.errors, results.warnings),
/// }
/// # Ok(())
/// # }
/// ```
pub fn handle_upload<P: AsRef<Path>>(
    paths: &[P],
    options: &UploadOptions,
) -> AggregationResult<Results> {
    let Some(first) = paths.first() else {
        return Ok(reject(&UploadContext::in_memory(), options, NO_FILE_ERROR.to_string()));
    };
    let path = first.as_ref();
    let ctx = UploadContext::from_path(path);

    let size = fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| report_failure(&ctx, options, e.into()))?;
    if size > options.max_bytes {
        return Ok(reject(&ctx, options, too_large_message(options.max_bytes)));
    }

    let bytes = fs::read(path).map_err(|e| report_failure(&ctx, options, e.into()))?;

    Ok(match process(&ctx, &bytes, options) {
        Outcome::Aggregated(mut results) => {
            if paths.len() > 1 {
                results.warnings.push(EXTRA_FILES_WARNING.to_string());
            }
            results
        }
        Outcome::Rejected(results) => results,
    })
}

/// Aggregate an in-memory CSV payload.
///
/// Same rules as [`handle_upload`] minus file selection; the size cap applies to `bytes.len()`.
pub fn handle_upload_bytes(bytes: &[u8], options: &UploadOptions) -> Results {
    process(&UploadContext::in_memory(), bytes, options).into_results()
}

enum Outcome {
    Aggregated(Results),
    Rejected(Results),
}

impl Outcome {
    fn into_results(self) -> Results {
        match self {
            Self::Aggregated(r) | Self::Rejected(r) => r,
        }
    }
}

fn process(ctx: &UploadContext, bytes: &[u8], options: &UploadOptions) -> Outcome {
    if bytes.len() as u64 > options.max_bytes {
        return Outcome::Rejected(reject(ctx, options, too_large_message(options.max_bytes)));
    }

    let table = match decode_table(bytes) {
        Ok(table) => table,
        Err(e) => {
            report_failure(ctx, options, e);
            return Outcome::Rejected(Results::failed(INVALID_CSV_ERROR));
        }
    };

    aggregate_table(ctx, &table, options)
}

fn aggregate_table(ctx: &UploadContext, table: &RawTable, options: &UploadOptions) -> Outcome {
    match aggregate::run(table) {
        Ok(results) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_success(ctx, UploadStats::from_results(table.len(), &results));
            }
            Outcome::Aggregated(results)
        }
        Err(e) => {
            report_failure(ctx, options, e);
            Outcome::Rejected(Results::failed(UNEXPECTED_ERROR))
        }
    }
}

fn reject(ctx: &UploadContext, options: &UploadOptions, message: String) -> Results {
    if let Some(obs) = options.observer.as_ref() {
        obs.on_rejected(ctx, &message);
    }
    Results::failed(message)
}

fn report_failure(
    ctx: &UploadContext,
    options: &UploadOptions,
    error: AggregationError,
) -> AggregationError {
    if let Some(obs) = options.observer.as_ref() {
        let sev = severity_for_error(&error);
        obs.on_failure(ctx, sev, &error);
        if sev >= options.alert_at_or_above {
            obs.on_alert(ctx, sev, &error);
        }
    }
    error
}

fn severity_for_error(e: &AggregationError) -> UploadSeverity {
    match e {
        AggregationError::Io(_) => UploadSeverity::Critical,
        AggregationError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => UploadSeverity::Critical,
            _ => UploadSeverity::Error,
        },
        AggregationError::RowTooShort { .. } => UploadSeverity::Error,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{
        aggregate_table, handle_upload_bytes, too_large_message, Outcome, UploadOptions,
        INVALID_CSV_ERROR, UNEXPECTED_ERROR,
    };
    use crate::error::AggregationError;
    use crate::types::RawTable;
    use crate::upload::observability::{UploadContext, UploadObserver, UploadSeverity};

    #[derive(Default)]
    struct FailureLog {
        failures: Mutex<Vec<(UploadSeverity, String)>>,
    }

    impl UploadObserver for FailureLog {
        fn on_failure(&self, _ctx: &UploadContext, severity: UploadSeverity, error: &AggregationError) {
            self.failures.lock().unwrap().push((severity, error.to_string()));
        }
    }

    #[test]
    fn too_large_message_reports_mebibytes() {
        assert_eq!(
            too_large_message(1024 * 1024),
            "File is too large to process. Maximum allowed size is 1.0 MB."
        );
        assert_eq!(
            too_large_message(512 * 1024),
            "File is too large to process. Maximum allowed size is 0.5 MB."
        );
    }

    #[test]
    fn payload_over_cap_is_not_decoded() {
        let opts = UploadOptions {
            max_bytes: 4,
            ..Default::default()
        };
        // Would be a decode error if it were decoded.
        let r = handle_upload_bytes(b"a,b\nc\n", &opts);
        assert_eq!(r.errors, vec![too_large_message(4)]);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn payload_at_cap_is_accepted() {
        let input = b"CharacteristicName,ResultValue\n";
        let opts = UploadOptions {
            max_bytes: input.len() as u64,
            ..Default::default()
        };
        let r = handle_upload_bytes(input, &opts);
        assert!(r.errors.is_empty());
        assert_eq!(r.warnings, vec!["No water temperature data found.".to_string()]);
    }

    #[test]
    fn undecodable_payload_reports_invalid_csv() {
        let r = handle_upload_bytes(b"a,b\nc\n", &UploadOptions::default());
        assert_eq!(r.errors, vec![INVALID_CSV_ERROR.to_string()]);
        assert_eq!(r.average, None);
    }

    #[test]
    fn options_debug_hides_observer() {
        let dbg = format!("{:?}", UploadOptions::default());
        assert!(dbg.contains("observer_set: false"));
        assert!(dbg.contains("max_bytes: 1048576"));
    }

    #[test]
    fn latin1_bytes_in_other_columns_still_average() {
        let r = handle_upload_bytes(
            b"CharacteristicName,ResultValue,ResultUnit\n\
              \"Temperature, water\",3,\xB0C\n\
              \"Temperature, water\",5,\xB0C\n",
            &UploadOptions::default(),
        );
        assert!(r.errors.is_empty());
        assert!(r.warnings.is_empty());
        assert_eq!(r.average, Some(4.0));
    }

    #[test]
    fn short_row_maps_to_unexpected_error() {
        let log = Arc::new(FailureLog::default());
        let opts = UploadOptions {
            observer: Some(log.clone()),
            ..Default::default()
        };
        let table: RawTable = vec![
            vec!["CharacteristicName".to_string(), "ResultValue".to_string()],
            vec!["Temperature, water".to_string()],
        ];

        let outcome = aggregate_table(&UploadContext::in_memory(), &table, &opts);

        let r = match outcome {
            Outcome::Rejected(r) => r,
            Outcome::Aggregated(r) => panic!("expected rejection, got {r:?}"),
        };
        assert_eq!(r.errors, vec![UNEXPECTED_ERROR.to_string()]);
        assert_eq!(r.average, None);

        let failures = log.failures.lock().unwrap().clone();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, UploadSeverity::Error);
        assert!(failures[0].1.contains("column 'ResultValue' is at position 1"));
    }
}
