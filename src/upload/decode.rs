//! CSV decoding into a [`RawTable`].

use std::io::Read;

use crate::error::AggregationResult;
use crate::types::RawTable;

/// Decode an in-memory CSV payload into rows of text fields.
///
/// Rules:
///
/// - Every record becomes a row, including the first; the engine decides what a header is.
/// - All records must have the same number of fields.
/// - Fields are kept verbatim (no trimming); bytes that are not valid UTF-8 become U+FFFD.
/// - Empty input yields an empty table.
pub fn decode_table(bytes: &[u8]) -> AggregationResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(bytes);
    decode_table_from_reader(&mut rdr)
}

/// Decode all remaining records from an existing CSV reader.
pub fn decode_table_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> AggregationResult<RawTable> {
    let mut rows = RawTable::new();
    for result in rdr.byte_records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    Ok(rows)
}
