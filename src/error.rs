use thiserror::Error;

/// Convenience result type for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Error type shared across export, session, and summary paths.
///
/// The parse pipeline itself never returns an error: malformed input and unrecognized headers
/// are data states on [`crate::ingest::ParseOutcome`]. The `NoData`/`UnrecognizedFormat`
/// variants exist so the upload path can surface those states to its caller.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error on the export path.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Uploaded text had no header plus at least one data row.
    #[error("no data: input needs a header line and at least one data row")]
    NoData,

    /// Uploaded text's header matched none of the known schemas.
    #[error("unrecognized format: header matches no known schema")]
    UnrecognizedFormat,

    /// Uploaded text parsed, but not into the schema the caller required.
    #[error("wrong schema: expected {expected}, file classified as {actual}")]
    WrongSchema {
        expected: &'static str,
        actual: &'static str,
    },

    /// Remote snapshot fetch failed; callers keep showing last-known state.
    #[error("snapshot fetch failed: {message}")]
    Snapshot { message: String },

    /// Insight backend failed; callers substitute the fixed fallback text.
    #[error("summary generation failed: {message}")]
    Summary { message: String },
}
