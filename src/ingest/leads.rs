//! Lead field mapper.
//!
//! Columns are identified by keyword containment against an ordered rule table, not by fixed
//! position or exact name. Rows accumulate into a builder of optional fields; defaults are
//! applied once at materialization, never mid-row.

use crate::ingest::coerce::{
    to_iso, try_normalize_status, try_parse_currency, try_parse_date,
};
use crate::ingest::tokenizer::TokenizedDocument;
use crate::ingest::ParseBatch;
use crate::types::{Lead, LeadStatus};

/// Semantic lead columns a header token can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadColumn {
    ClientName,
    Source,
    Category,
    Status,
    MrcValue,
    NextFollowUp,
    Owner,
    DateAdded,
    LastContacted,
}

/// Ordered (keywords, column) rules; the first rule whose keyword the header contains wins.
///
/// Order is load-bearing: "Next Follow-up Date" must hit the follow-up rule before the
/// "date" keyword can claim it for [`LeadColumn::DateAdded`].
const COLUMN_RULES: &[(&[&str], LeadColumn)] = &[
    (&["client", "customer"], LeadColumn::ClientName),
    (&["source"], LeadColumn::Source),
    (&["category", "type"], LeadColumn::Category),
    (&["status"], LeadColumn::Status),
    (&["mrc", "value"], LeadColumn::MrcValue),
    (&["follow", "next"], LeadColumn::NextFollowUp),
    (&["owner", "manager"], LeadColumn::Owner),
    (&["added", "date"], LeadColumn::DateAdded),
    (&["contacted", "last"], LeadColumn::LastContacted),
];

fn match_column(header: &str) -> Option<LeadColumn> {
    COLUMN_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| header.contains(k)))
        .map(|(_, column)| *column)
}

/// In-progress lead; `None` means the column was absent or its value unusable.
#[derive(Debug, Default)]
struct LeadBuilder {
    client_name: Option<String>,
    source: Option<String>,
    category: Option<String>,
    status: Option<LeadStatus>,
    mrc_value: Option<f64>,
    date_added: Option<String>,
    last_contacted: Option<String>,
    next_follow_up: Option<String>,
    owner: Option<String>,
}

impl LeadBuilder {
    fn assign(&mut self, column: LeadColumn, value: &str) {
        match column {
            LeadColumn::ClientName => self.client_name = non_empty(value),
            LeadColumn::Source => self.source = non_empty(value),
            LeadColumn::Category => self.category = non_empty(value),
            LeadColumn::Status => self.status = try_normalize_status(value),
            LeadColumn::MrcValue => self.mrc_value = try_parse_currency(value),
            LeadColumn::NextFollowUp => self.next_follow_up = try_parse_date(value).map(to_iso),
            LeadColumn::Owner => self.owner = non_empty(value),
            LeadColumn::DateAdded => self.date_added = try_parse_date(value).map(to_iso),
            LeadColumn::LastContacted => self.last_contacted = try_parse_date(value).map(to_iso),
        }
    }

    /// Materialize the final record, counting how many fields fell back to a default.
    fn build(self, id: String, batch: &ParseBatch) -> (Lead, usize) {
        let mut defaulted = 0;
        let mut take_str = |value: Option<String>, default: &str| {
            value.unwrap_or_else(|| {
                defaulted += 1;
                default.to_string()
            })
        };

        let client_name = take_str(self.client_name, "Unnamed Client");
        let source = take_str(self.source, "Direct");
        let category = take_str(self.category, "Standard");
        let owner = take_str(self.owner, "Unassigned");
        let date_added = take_str(self.date_added, &batch.now_iso);
        let last_contacted = take_str(self.last_contacted, &batch.now_iso);
        let next_follow_up = take_str(self.next_follow_up, &batch.now_iso);

        let status = self.status.unwrap_or_else(|| {
            defaulted += 1;
            LeadStatus::default()
        });
        let mrc_value = self.mrc_value.unwrap_or_else(|| {
            defaulted += 1;
            0.0
        });

        let lead = Lead {
            id,
            client_name,
            source,
            category,
            status,
            mrc_value,
            date_added,
            last_contacted,
            next_follow_up,
            owner,
        };
        (lead, defaulted)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Map all tokenized rows into [`Lead`] records.
///
/// Returns the records plus the total count of defaulted fields across the batch (reported to
/// parse observers).
pub(crate) fn map_leads(doc: &TokenizedDocument, batch: &ParseBatch) -> (Vec<Lead>, usize) {
    let mut leads = Vec::with_capacity(doc.rows.len());
    let mut total_defaulted = 0;

    for (row_idx, row) in doc.rows.iter().enumerate() {
        let mut builder = LeadBuilder::default();
        for (col_idx, header) in doc.headers.iter().enumerate() {
            if let Some(column) = match_column(header) {
                let value = row.get(col_idx).map(String::as_str).unwrap_or("");
                builder.assign(column, value);
            }
        }
        let (lead, defaulted) = builder.build(batch.record_id("lead", row_idx), batch);
        total_defaulted += defaulted;
        leads.push(lead);
    }

    (leads, total_defaulted)
}
