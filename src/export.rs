//! CSV export: the inverse of the ingestion pipeline.
//!
//! Field names are chosen so an exported leads file classifies and re-maps cleanly when
//! uploaded back through [`crate::ingest::parse_document`].

use csv::{QuoteStyle, WriterBuilder};

use crate::error::DashboardResult;
use crate::types::{Lead, OperationalTarget, StaffMember};

/// A record type that can be written to CSV.
///
/// The header is the type's field names in declaration order, so a `&[T]` slice is uniform by
/// construction; heterogeneous record sets are unrepresentable.
pub trait CsvRecord {
    /// Column names, in order.
    const FIELD_NAMES: &'static [&'static str];

    /// This record's values, in [`Self::FIELD_NAMES`] order.
    fn field_values(&self) -> Vec<String>;
}

impl CsvRecord for Lead {
    const FIELD_NAMES: &'static [&'static str] = &[
        "id",
        "clientName",
        "source",
        "category",
        "status",
        "mrcValue",
        "dateAdded",
        "lastContacted",
        "nextFollowUp",
        "owner",
    ];

    fn field_values(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.client_name.clone(),
            self.source.clone(),
            self.category.clone(),
            self.status.to_string(),
            format_number(self.mrc_value),
            self.date_added.clone(),
            self.last_contacted.clone(),
            self.next_follow_up.clone(),
            self.owner.clone(),
        ]
    }
}

impl CsvRecord for StaffMember {
    const FIELD_NAMES: &'static [&'static str] = &[
        "id",
        "staffName",
        "designation",
        "onDuty",
        "currentAssignment",
        "lastLocation",
    ];

    fn field_values(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.designation.clone(),
            if self.is_on_duty { "Yes" } else { "No" }.to_string(),
            self.current_assignment.clone().unwrap_or_default(),
            self.last_location.clone().unwrap_or_default(),
        ]
    }
}

impl CsvRecord for OperationalTarget {
    const FIELD_NAMES: &'static [&'static str] = &["category", "mrcTarget", "leadGoal"];

    fn field_values(&self) -> Vec<String> {
        vec![
            self.category.clone(),
            format_number(self.mrc_target),
            self.lead_goal.to_string(),
        ]
    }
}

/// A finished export: the suggested download name plus the CSV bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// `<stem>.csv`.
    pub filename: String,
    /// UTF-8 CSV text: header line, then one line per record, every value double-quoted with
    /// embedded quotes doubled.
    pub bytes: Vec<u8>,
}

impl CsvExport {
    /// The CSV text as a string slice.
    pub fn as_str(&self) -> &str {
        // Writer output is built from &str values only.
        std::str::from_utf8(&self.bytes).unwrap_or("")
    }
}

/// Export a record set to CSV.
///
/// Returns `Ok(None)` for an empty record set: there is nothing to download, and the caller
/// must not produce an empty file.
pub fn export_to_csv<R: CsvRecord>(records: &[R], stem: &str) -> DashboardResult<Option<CsvExport>> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    wtr.write_record(R::FIELD_NAMES)?;
    for record in records {
        wtr.write_record(record.field_values())?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(Some(CsvExport {
        filename: format!("{stem}.csv"),
        bytes,
    }))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
