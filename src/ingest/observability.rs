//! Parse observability.
//!
//! The pipeline itself never fails; observers exist so callers can log, meter, or alert on
//! parse outcomes (empty uploads, unrecognized headers, heavy defaulting) without the pipeline
//! growing a logging dependency of its own.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use super::classify::SchemaKind;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParseSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (input usable but empty).
    Warning,
    /// Error-level event (input could not be dispatched to any schema).
    Error,
}

/// Why a parse produced no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// Fewer than a header plus one data row.
    NoData,
    /// Header matched no known schema.
    UnrecognizedFormat,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => f.write_str("no data (need a header line and at least one data row)"),
            Self::UnrecognizedFormat => f.write_str("unrecognized format (header matches no known schema)"),
        }
    }
}

/// Context about one parse attempt.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Schema the document dispatched to, when one was chosen.
    pub schema: Option<SchemaKind>,
    /// Size of the raw input in bytes.
    pub input_bytes: usize,
}

/// Stats reported on successful parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    /// Number of records produced.
    pub rows: usize,
    /// Total count of fields that fell back to a default across the batch. A high ratio of
    /// defaults to rows usually means the upload's columns barely matched the schema.
    pub defaulted_fields: usize,
}

/// Observer interface for parse outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ParseObserver: Send + Sync {
    /// Called when a parse produces records.
    fn on_success(&self, _ctx: &ParseContext, _stats: ParseStats) {}

    /// Called when a parse produces no records.
    fn on_failure(&self, _ctx: &ParseContext, _severity: ParseSeverity, _failure: ParseFailure) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ParseContext, severity: ParseSeverity, failure: ParseFailure) {
        self.on_failure(ctx, severity, failure)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ParseObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ParseObserver>>) -> Self {
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

impl ParseObserver for CompositeObserver {
    fn on_success(&self, ctx: &ParseContext, stats: ParseStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ParseContext, severity: ParseSeverity, failure: ParseFailure) {
        for o in &self.observers {
            o.on_failure(ctx, severity, failure);
        }
    }

    fn on_alert(&self, ctx: &ParseContext, severity: ParseSeverity, failure: ParseFailure) {
        for o in &self.observers {
            o.on_alert(ctx, severity, failure);
        }
    }
}

/// Logs parse events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ParseObserver for StdErrObserver {
    fn on_success(&self, ctx: &ParseContext, stats: ParseStats) {
        eprintln!(
            "[parse][ok] schema={} bytes={} rows={} defaulted={}",
            schema_name(ctx),
            ctx.input_bytes,
            stats.rows,
            stats.defaulted_fields
        );
    }

    fn on_failure(&self, ctx: &ParseContext, severity: ParseSeverity, failure: ParseFailure) {
        eprintln!(
            "[parse][{:?}] schema={} bytes={} err={}",
            severity,
            schema_name(ctx),
            ctx.input_bytes,
            failure
        );
    }

    fn on_alert(&self, ctx: &ParseContext, severity: ParseSeverity, failure: ParseFailure) {
        eprintln!(
            "[ALERT][parse][{:?}] schema={} bytes={} err={}",
            severity,
            schema_name(ctx),
            ctx.input_bytes,
            failure
        );
    }
}

/// Appends parse events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ParseObserver for FileObserver {
    fn on_success(&self, ctx: &ParseContext, stats: ParseStats) {
        self.append_line(&format!(
            "{} ok schema={} bytes={} rows={} defaulted={}",
            unix_ts(),
            schema_name(ctx),
            ctx.input_bytes,
            stats.rows,
            stats.defaulted_fields
        ));
    }

    fn on_failure(&self, ctx: &ParseContext, severity: ParseSeverity, failure: ParseFailure) {
        self.append_line(&format!(
            "{} fail severity={:?} schema={} bytes={} err={}",
            unix_ts(),
            severity,
            schema_name(ctx),
            ctx.input_bytes,
            failure
        ));
    }

    fn on_alert(&self, ctx: &ParseContext, severity: ParseSeverity, failure: ParseFailure) {
        self.append_line(&format!(
            "{} ALERT severity={:?} schema={} bytes={} err={}",
            unix_ts(),
            severity,
            schema_name(ctx),
            ctx.input_bytes,
            failure
        ));
    }
}

fn schema_name(ctx: &ParseContext) -> &'static str {
    ctx.schema.map(|s| s.as_str()).unwrap_or("unknown")
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
