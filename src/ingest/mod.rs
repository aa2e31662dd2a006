//! Adaptive CSV ingestion pipeline.
//!
//! Most callers should use [`parse_document`], which:
//!
//! - tokenizes raw text into a header plus data rows ([`tokenizer`])
//! - sniffs the header to pick a record schema ([`classify`]), unless one is forced via
//!   [`ParseOptions::schema`]
//! - maps each row through the schema's keyword rule table with per-field coercion and
//!   defaulting ([`leads`], [`staff`], [`targets`], [`coerce`])
//! - optionally reports the outcome to a [`ParseObserver`]
//!
//! Nothing on this path returns an error: empty input and unrecognized headers are outcome
//! variants the caller can distinguish, and bad cells resolve to documented defaults.

pub mod classify;
pub mod coerce;
pub mod leads;
pub mod observability;
pub mod staff;
pub mod targets;
pub mod tokenizer;

use std::fmt;
use std::sync::Arc;

use chrono::Utc;

use crate::types::{Lead, OperationalTarget, StaffMember};

pub use classify::{classify_header, SchemaKind};
pub use observability::{
    CompositeObserver, FileObserver, ParseContext, ParseFailure, ParseObserver, ParseSeverity,
    ParseStats, StdErrObserver,
};
pub use tokenizer::{tokenize, TokenizedDocument};

/// Options controlling [`parse_document`].
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct ParseOptions {
    /// If `None`, the schema is sniffed from the header line; set to force a schema and skip
    /// classification (useful when the caller already knows what it uploaded).
    pub schema: Option<SchemaKind>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ParseObserver>>,
    /// Severity threshold at which `on_alert` is invoked. Defaults to
    /// [`ParseSeverity::Error`], i.e. only unrecognized formats alert.
    pub alert_at_or_above: Option<ParseSeverity>,
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("schema", &self.schema)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// The result of one parse call.
///
/// `NoData` and `Unrecognized` are caller-distinguishable conditions, not errors: the first
/// means "empty file" messaging, the second "unknown format" messaging.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Input had fewer than a header line plus one data row.
    NoData,
    /// Header matched no known schema; no records were produced.
    Unrecognized,
    /// Lead funnel records.
    Leads(Vec<Lead>),
    /// Staff roster records.
    Staff(Vec<StaffMember>),
    /// Operational target records.
    Targets(Vec<OperationalTarget>),
}

impl ParseOutcome {
    /// The schema this outcome carries records for, if any.
    pub fn schema(&self) -> Option<SchemaKind> {
        match self {
            Self::NoData | Self::Unrecognized => None,
            Self::Leads(_) => Some(SchemaKind::Leads),
            Self::Staff(_) => Some(SchemaKind::Staff),
            Self::Targets(_) => Some(SchemaKind::Targets),
        }
    }

    /// Number of records produced.
    pub fn len(&self) -> usize {
        match self {
            Self::NoData | Self::Unrecognized => 0,
            Self::Leads(v) => v.len(),
            Self::Staff(v) => v.len(),
            Self::Targets(v) => v.len(),
        }
    }

    /// True when no records were produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared per-parse state: one timestamp for the whole batch, used for generated ids and for
/// defaulting absent date fields.
pub(crate) struct ParseBatch {
    timestamp_ms: i64,
    /// "Now" at parse time, pre-rendered as ISO-8601.
    pub now_iso: String,
}

impl ParseBatch {
    pub(crate) fn new() -> Self {
        let now = Utc::now();
        Self {
            timestamp_ms: now.timestamp_millis(),
            now_iso: coerce::to_iso(now),
        }
    }

    /// Batch-unique record id: `<prefix>-<row index>-<batch millis>`.
    pub(crate) fn record_id(&self, prefix: &str, row_idx: usize) -> String {
        format!("{prefix}-{row_idx}-{}", self.timestamp_ms)
    }
}

/// Parse raw CSV text into typed records.
///
/// Control flow: tokenize, classify (or honor a forced schema), map fields. When an observer is
/// configured, this reports:
///
/// - `on_success` with row/defaulting stats when records were produced
/// - `on_failure` for `NoData` (warning) and `Unrecognized` (error)
/// - `on_alert` when the failure severity is >= the configured threshold
///
/// # Examples
///
/// ```
/// use funnel_analytics::ingest::{parse_document, ParseOptions, ParseOutcome};
///
/// let raw = "Client Name,Status,MRC Value\nAcme Corp,HOT!!,\"$12,000\"\n";
/// match parse_document(raw, &ParseOptions::default()) {
///     ParseOutcome::Leads(leads) => {
///         assert_eq!(leads[0].client_name, "Acme Corp");
///         assert_eq!(leads[0].mrc_value, 12000.0);
///     }
///     other => panic!("expected leads, got {other:?}"),
/// }
/// ```
///
/// Forcing a schema skips header sniffing:
///
/// ```
/// use funnel_analytics::ingest::{parse_document, ParseOptions, ParseOutcome, SchemaKind};
///
/// let opts = ParseOptions {
///     schema: Some(SchemaKind::Staff),
///     ..Default::default()
/// };
/// let outcome = parse_document("Name,Role\nA,Manager\n", &opts);
/// assert_eq!(outcome.schema(), Some(SchemaKind::Staff));
/// ```
pub fn parse_document(raw: &str, options: &ParseOptions) -> ParseOutcome {
    let (outcome, defaulted) = run_parse(raw, options.schema);

    if let Some(obs) = options.observer.as_ref() {
        let ctx = ParseContext {
            schema: outcome.schema(),
            input_bytes: raw.len(),
        };
        match &outcome {
            ParseOutcome::NoData => report_failure(obs, options, &ctx, ParseFailure::NoData),
            ParseOutcome::Unrecognized => {
                report_failure(obs, options, &ctx, ParseFailure::UnrecognizedFormat)
            }
            _ => obs.on_success(
                &ctx,
                ParseStats {
                    rows: outcome.len(),
                    defaulted_fields: defaulted,
                },
            ),
        }
    }

    outcome
}

fn run_parse(raw: &str, forced: Option<SchemaKind>) -> (ParseOutcome, usize) {
    let Some(doc) = tokenize(raw) else {
        return (ParseOutcome::NoData, 0);
    };

    let schema = match forced.or_else(|| classify_header(&doc.header_line)) {
        Some(schema) => schema,
        None => return (ParseOutcome::Unrecognized, 0),
    };

    let batch = ParseBatch::new();
    match schema {
        SchemaKind::Leads => {
            let (records, defaulted) = leads::map_leads(&doc, &batch);
            (ParseOutcome::Leads(records), defaulted)
        }
        SchemaKind::Staff => {
            let (records, defaulted) = staff::map_staff(&doc, &batch);
            (ParseOutcome::Staff(records), defaulted)
        }
        SchemaKind::Targets => {
            let (records, defaulted) = targets::map_targets(&doc);
            (ParseOutcome::Targets(records), defaulted)
        }
    }
}

fn severity_for_failure(failure: ParseFailure) -> ParseSeverity {
    match failure {
        ParseFailure::NoData => ParseSeverity::Warning,
        ParseFailure::UnrecognizedFormat => ParseSeverity::Error,
    }
}

fn report_failure(
    obs: &Arc<dyn ParseObserver>,
    options: &ParseOptions,
    ctx: &ParseContext,
    failure: ParseFailure,
) {
    let severity = severity_for_failure(failure);
    obs.on_failure(ctx, severity, failure);
    let threshold = options.alert_at_or_above.unwrap_or(ParseSeverity::Error);
    if severity >= threshold {
        obs.on_alert(ctx, severity, failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_for_short_inputs() {
        let opts = ParseOptions::default();
        assert_eq!(parse_document("", &opts), ParseOutcome::NoData);
        assert_eq!(parse_document("Client Name\n", &opts), ParseOutcome::NoData);
        assert_eq!(parse_document("\n\n  \n", &opts), ParseOutcome::NoData);
    }

    #[test]
    fn unknown_header_is_unrecognized_not_empty_leads() {
        let outcome = parse_document("alpha,beta\n1,2\n", &ParseOptions::default());
        assert_eq!(outcome, ParseOutcome::Unrecognized);
        assert!(outcome.is_empty());
        assert_eq!(outcome.schema(), None);
    }

    #[test]
    fn forced_schema_skips_sniffing() {
        // This header would classify as targets; the override wins.
        let opts = ParseOptions {
            schema: Some(SchemaKind::Leads),
            ..Default::default()
        };
        let outcome = parse_document("Goal,Category\n10,SME\n", &opts);
        assert_eq!(outcome.schema(), Some(SchemaKind::Leads));
        assert_eq!(outcome.len(), 1);
    }

    #[test]
    fn forced_schema_still_requires_data_rows() {
        let opts = ParseOptions {
            schema: Some(SchemaKind::Leads),
            ..Default::default()
        };
        assert_eq!(parse_document("Client Name\n", &opts), ParseOutcome::NoData);
    }
}
