//! Operational-target field mapper.

use crate::ingest::coerce::{try_parse_count, try_parse_currency};
use crate::ingest::tokenizer::TokenizedDocument;
use crate::types::OperationalTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetColumn {
    Category,
    LeadGoal,
    MrcTarget,
}

/// Ordered rules; category first so "Target Category" is not claimed by the MRC rule.
const COLUMN_RULES: &[(&[&str], TargetColumn)] = &[
    (&["category", "segment"], TargetColumn::Category),
    (&["goal", "count"], TargetColumn::LeadGoal),
    (&["mrc", "target"], TargetColumn::MrcTarget),
];

fn match_column(header: &str) -> Option<TargetColumn> {
    COLUMN_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| header.contains(k)))
        .map(|(_, column)| *column)
}

#[derive(Debug, Default)]
struct TargetBuilder {
    category: Option<String>,
    mrc_target: Option<f64>,
    lead_goal: Option<u32>,
}

impl TargetBuilder {
    fn assign(&mut self, column: TargetColumn, value: &str) {
        match column {
            TargetColumn::Category => {
                self.category = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            TargetColumn::MrcTarget => self.mrc_target = try_parse_currency(value),
            TargetColumn::LeadGoal => self.lead_goal = try_parse_count(value),
        }
    }

    fn build(self) -> (OperationalTarget, usize) {
        let mut defaulted = 0;
        let category = self.category.unwrap_or_else(|| {
            defaulted += 1;
            "Standard".to_string()
        });
        let mrc_target = self.mrc_target.unwrap_or_else(|| {
            defaulted += 1;
            0.0
        });
        let lead_goal = self.lead_goal.unwrap_or_else(|| {
            defaulted += 1;
            0
        });

        (
            OperationalTarget {
                category,
                mrc_target,
                lead_goal,
            },
            defaulted,
        )
    }
}

/// Map all tokenized rows into [`OperationalTarget`] records, returning the records plus the
/// total defaulted-field count for observers. Targets carry no generated id.
pub(crate) fn map_targets(doc: &TokenizedDocument) -> (Vec<OperationalTarget>, usize) {
    let mut targets = Vec::with_capacity(doc.rows.len());
    let mut total_defaulted = 0;

    for row in &doc.rows {
        let mut builder = TargetBuilder::default();
        for (col_idx, header) in doc.headers.iter().enumerate() {
            if let Some(column) = match_column(header) {
                let value = row.get(col_idx).map(String::as_str).unwrap_or("");
                builder.assign(column, value);
            }
        }
        let (target, defaulted) = builder.build();
        total_defaulted += defaulted;
        targets.push(target);
    }

    (targets, total_defaulted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::tokenizer::tokenize;

    fn map(raw: &str) -> Vec<OperationalTarget> {
        map_targets(&tokenize(raw).unwrap()).0
    }

    #[test]
    fn maps_target_columns_with_coercion() {
        let targets = map("Category,MRC Target,Lead Goal\nEnterprise,\"₹2,50,000\",40\n");
        assert_eq!(targets[0].category, "Enterprise");
        assert_eq!(targets[0].mrc_target, 250000.0);
        assert_eq!(targets[0].lead_goal, 40);
    }

    #[test]
    fn bad_numbers_default_to_zero() {
        let targets = map("Category,MRC Target,Lead Goal\nSME,TBD,n/a\n");
        assert_eq!(targets[0].mrc_target, 0.0);
        assert_eq!(targets[0].lead_goal, 0);
    }

    #[test]
    fn category_rule_outranks_target_rule() {
        let targets = map("Target Category,MRC Target\nStartup,1000\n");
        assert_eq!(targets[0].category, "Startup");
        assert_eq!(targets[0].mrc_target, 1000.0);
    }
}
