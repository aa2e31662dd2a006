//! Staff roster field mapper.

use crate::ingest::coerce::parse_yes_no;
use crate::ingest::tokenizer::TokenizedDocument;
use crate::ingest::ParseBatch;
use crate::types::StaffMember;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StaffColumn {
    Designation,
    OnDuty,
    Assignment,
    Location,
    Name,
}

/// Ordered rules; name goes last because its keywords ("name", "staff") are the broadest and
/// would otherwise claim headers like "Staff Present".
const COLUMN_RULES: &[(&[&str], StaffColumn)] = &[
    (&["designation", "role"], StaffColumn::Designation),
    (&["duty", "present"], StaffColumn::OnDuty),
    (&["assignment", "task"], StaffColumn::Assignment),
    (&["location"], StaffColumn::Location),
    (&["name", "staff"], StaffColumn::Name),
];

fn match_column(header: &str) -> Option<StaffColumn> {
    COLUMN_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| header.contains(k)))
        .map(|(_, column)| *column)
}

#[derive(Debug, Default)]
struct StaffBuilder {
    name: Option<String>,
    designation: Option<String>,
    is_on_duty: Option<bool>,
    current_assignment: Option<String>,
    last_location: Option<String>,
}

impl StaffBuilder {
    fn assign(&mut self, column: StaffColumn, value: &str) {
        match column {
            StaffColumn::Name => self.name = non_empty(value),
            StaffColumn::Designation => self.designation = non_empty(value),
            StaffColumn::OnDuty => self.is_on_duty = Some(parse_yes_no(value)),
            StaffColumn::Assignment => self.current_assignment = non_empty(value),
            StaffColumn::Location => self.last_location = non_empty(value),
        }
    }

    fn build(self, id: String) -> (StaffMember, usize) {
        let mut defaulted = 0;
        let name = self.name.unwrap_or_else(|| {
            defaulted += 1;
            "Unnamed Staff".to_string()
        });
        let designation = self.designation.unwrap_or_else(|| {
            defaulted += 1;
            "Unassigned".to_string()
        });
        let is_on_duty = self.is_on_duty.unwrap_or_else(|| {
            defaulted += 1;
            false
        });

        let member = StaffMember {
            id,
            name,
            designation,
            is_on_duty,
            // Optional by design; absence is data, not a default.
            current_assignment: self.current_assignment,
            last_location: self.last_location,
        };
        (member, defaulted)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Map all tokenized rows into [`StaffMember`] records, returning the records plus the total
/// defaulted-field count for observers.
pub(crate) fn map_staff(doc: &TokenizedDocument, batch: &ParseBatch) -> (Vec<StaffMember>, usize) {
    let mut members = Vec::with_capacity(doc.rows.len());
    let mut total_defaulted = 0;

    for (row_idx, row) in doc.rows.iter().enumerate() {
        let mut builder = StaffBuilder::default();
        for (col_idx, header) in doc.headers.iter().enumerate() {
            if let Some(column) = match_column(header) {
                let value = row.get(col_idx).map(String::as_str).unwrap_or("");
                builder.assign(column, value);
            }
        }
        let (member, defaulted) = builder.build(batch.record_id("staff", row_idx));
        total_defaulted += defaulted;
        members.push(member);
    }

    (members, total_defaulted)
}
