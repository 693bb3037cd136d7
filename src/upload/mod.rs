//! Upload handling: from selected file(s) or raw bytes to [`crate::types::Results`].
//!
//! Most callers should use [`handle_upload`] (from [`handler`]) which:
//!
//! - processes only the first selected file, warning when more were given
//! - enforces a payload size cap (see [`UploadOptions::max_bytes`])
//! - decodes CSV into a [`crate::types::RawTable`] (see [`decode`])
//! - runs the aggregation engine and optionally reports outcomes to an [`UploadObserver`]

pub mod decode;
pub mod handler;
pub mod observability;

pub use decode::{decode_table, decode_table_from_reader};
pub use handler::{
    handle_upload, handle_upload_bytes, too_large_message, UploadOptions, DEFAULT_MAX_BYTES,
    EXTRA_FILES_WARNING, INVALID_CSV_ERROR, NO_FILE_ERROR, UNEXPECTED_ERROR,
};
pub use observability::{
    CompositeObserver, FileObserver, StdErrObserver, UploadContext, UploadObserver, UploadSeverity,
    UploadStats,
};
