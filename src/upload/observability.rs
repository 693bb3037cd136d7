use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AggregationError;
use crate::types::Results;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UploadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the upload could not be aggregated).
    Error,
    /// Critical error (typically I/O failures).
    Critical,
}

/// Context about an upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadContext {
    /// Source file, or `None` for an in-memory payload.
    pub path: Option<PathBuf>,
}

impl UploadContext {
    /// Context for a file-backed upload.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Context for an in-memory payload.
    pub fn in_memory() -> Self {
        Self { path: None }
    }
}

impl fmt::Display for UploadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(p) => write!(f, "{}", p.display()),
            None => f.write_str("<memory>"),
        }
    }
}

/// Stats reported when the engine ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    /// Decoded rows, header included.
    pub rows: usize,
    /// Rows that contributed a value to the average.
    pub contributing: usize,
    /// Number of header-level errors.
    pub errors: usize,
    /// Number of row-level warnings.
    pub warnings: usize,
}

impl UploadStats {
    pub fn from_results(rows: usize, results: &Results) -> Self {
        Self {
            rows,
            contributing: results.count,
            errors: results.errors.len(),
            warnings: results.warnings.len(),
        }
    }
}

/// Observer interface for upload outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait UploadObserver: Send + Sync {
    /// Called when the engine produced results (which may still carry errors/warnings).
    fn on_success(&self, _ctx: &UploadContext, _stats: UploadStats) {}

    /// Called when an upload is turned away before decoding (no file, too large).
    fn on_rejected(&self, _ctx: &UploadContext, _reason: &str) {}

    /// Called when decoding or aggregation fails.
    fn on_failure(&self, _ctx: &UploadContext, _severity: UploadSeverity, _error: &AggregationError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &AggregationError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn UploadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn UploadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl UploadObserver for CompositeObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_rejected(&self, ctx: &UploadContext, reason: &str) {
        for o in &self.observers {
            o.on_rejected(ctx, reason);
        }
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &AggregationError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &AggregationError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

fn success_line(ctx: &UploadContext, stats: UploadStats) -> String {
    format!(
        "ok source={ctx} rows={} contributing={} errors={} warnings={}",
        stats.rows, stats.contributing, stats.errors, stats.warnings
    )
}

fn failure_line(
    tag: &str,
    ctx: &UploadContext,
    severity: UploadSeverity,
    error: &AggregationError,
) -> String {
    format!("{tag} severity={severity:?} source={ctx} err={error}")
}

/// Logs upload events to stderr, prefixed with `[upload]`.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl UploadObserver for StdErrObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        eprintln!("[upload] {}", success_line(ctx, stats));
    }

    fn on_rejected(&self, ctx: &UploadContext, reason: &str) {
        eprintln!("[upload] rejected source={ctx} reason={reason}");
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &AggregationError) {
        eprintln!("[upload] {}", failure_line("fail", ctx, severity, error));
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &AggregationError) {
        eprintln!("[upload] {}", failure_line("ALERT", ctx, severity, error));
    }
}

/// Appends timestamped upload events to a local log file.
///
/// Writes are best-effort; failures to open or write the log are ignored.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, line: &str) {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{secs} {line}");
        }
    }
}

impl UploadObserver for FileObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        self.append(&success_line(ctx, stats));
    }

    fn on_rejected(&self, ctx: &UploadContext, reason: &str) {
        self.append(&format!("rejected source={ctx} reason={reason}"));
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &AggregationError) {
        self.append(&failure_line("fail", ctx, severity, error));
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &AggregationError) {
        self.append(&failure_line("ALERT", ctx, severity, error));
    }
}
