//! `water-temperature-stats` computes the average water temperature from a tabular (CSV-like)
//! table of observations, while reporting structural and per-row data-quality problems instead of
//! aborting.
//!
//! The primary entrypoint is [`aggregate::run`], which takes an already-decoded
//! [`types::RawTable`] (header first) and returns a [`types::Results`]. For files or raw bytes,
//! [`upload::handle_upload`] adds the size cap and CSV decoding around it.
//!
//! ## What gets averaged
//!
//! - The header must contain `CharacteristicName` and `ResultValue` (exact, case-sensitive).
//! - Only rows whose `CharacteristicName` is exactly `Temperature, water` contribute.
//! - `ResultValue` must be plain decimal notation (`12`, `-3.5`, `.5`, `1e2`); anything else is
//!   reported as a warning and skipped.
//!
//! ## Errors vs warnings
//!
//! - [`types::Results::errors`]: the header is missing a required column. No row is read and
//!   the average stays undefined.
//! - [`types::Results::warnings`]: a non-numeric value, or no contributing data at all. The
//!   average of the rows that did succeed is still reported.
//! - [`AggregationError`]: infrastructure failures (I/O, CSV decoding) and decoder contract
//!   violations. These are never folded into the message lists by the engine.
//!
//! ## Quick example
//!
//! ```rust
//! use water_temperature_stats::upload::{handle_upload_bytes, UploadOptions};
//!
//! let csv = b"CharacteristicName,ResultValue\n\
//!             \"Temperature, water\",3\n\
//!             \"Temperature, water\",5\n\
//!             \"Temperature, water\",Eleven\n";
//!
//! let results = handle_upload_bytes(csv, &UploadOptions::default());
//! assert_eq!(results.average, Some(4.0));
//! assert!(results.errors.is_empty());
//! assert_eq!(results.warnings, vec!["Row 3 has a non-numeric ResultValue: Eleven ".to_string()]);
//! ```
//!
//! ## Modules
//!
//! - [`aggregate`]: schema resolution, row accumulation and the single-pass driver
//! - [`upload`]: file selection, size cap, CSV decoding and observability hooks
//! - [`types`]: rows, tables, column index and the [`types::Results`] record
//! - [`error`]: error types

pub mod aggregate;
pub mod error;
pub mod types;
pub mod upload;

pub use error::{AggregationError, AggregationResult, SchemaFailure};
