//! Header-sniffing schema classifier.
//!
//! Uploaded spreadsheets name their columns inconsistently, so the classifier looks for
//! keywords anywhere in the raw header line instead of matching exact column names. Checks run
//! in a fixed priority order; the first schema whose keywords appear wins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The record shape a CSV document represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaKind {
    /// Sales lead funnel rows.
    Leads,
    /// Staff roster rows.
    Staff,
    /// Per-category operational target rows.
    Targets,
}

impl SchemaKind {
    /// Stable lowercase name, used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Staff => "staff",
            Self::Targets => "targets",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a document from its raw (not yet split) header line.
///
/// Priority order, first hit wins:
///
/// 1. "client" or "mrc value" => [`SchemaKind::Leads`]
/// 2. "staff" or "designation" => [`SchemaKind::Staff`]
/// 3. "target" or "goal" => [`SchemaKind::Targets`]
///
/// Returns `None` when no keyword is present (caller reports "unrecognized format").
pub fn classify_header(header_line: &str) -> Option<SchemaKind> {
    let line = header_line.to_lowercase();
    if line.contains("client") || line.contains("mrc value") {
        Some(SchemaKind::Leads)
    } else if line.contains("staff") || line.contains("designation") {
        Some(SchemaKind::Staff)
    } else if line.contains("target") || line.contains("goal") {
        Some(SchemaKind::Targets)
    } else {
        None
    }
}
