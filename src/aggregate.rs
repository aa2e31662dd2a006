//! Pure reducers over record sets.
//!
//! These are the dashboard's KPI and chart inputs: filtering, totals, and per-dimension
//! breakdowns. They never mutate their inputs and hold no state of their own.

use std::collections::BTreeMap;

use crate::types::{Lead, LeadStatus};

/// View-level lead filter. `None` dimensions mean "All"; the search term matches client name
/// or source, case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    /// Free-text search over client name and source; empty matches everything.
    pub search: String,
    /// Restrict to one status.
    pub status: Option<LeadStatus>,
    /// Restrict to one category.
    pub category: Option<String>,
    /// Restrict to one source.
    pub source: Option<String>,
}

impl LeadFilter {
    /// Whether `lead` passes every configured dimension.
    pub fn matches(&self, lead: &Lead) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || lead.client_name.to_lowercase().contains(&search)
            || lead.source.to_lowercase().contains(&search);
        let matches_status = self.status.is_none_or(|s| lead.status == s);
        let matches_category = self.category.as_deref().is_none_or(|c| lead.category == c);
        let matches_source = self.source.as_deref().is_none_or(|s| lead.source == s);
        matches_search && matches_status && matches_category && matches_source
    }
}

/// Filter a lead set down to the leads matching `filter`.
pub fn filter_leads(leads: &[Lead], filter: &LeadFilter) -> Vec<Lead> {
    leads.iter().filter(|l| filter.matches(l)).cloned().collect()
}

/// Sum of MRC values across the set.
pub fn total_mrc_value(leads: &[Lead]) -> f64 {
    leads.iter().map(|l| l.mrc_value).sum()
}

/// Count of high-intent leads.
pub fn hot_lead_count(leads: &[Lead]) -> usize {
    leads.iter().filter(|l| l.status == LeadStatus::Hot).count()
}

/// Lead count per status, in status order. Statuses with no leads are absent.
pub fn count_by_status(leads: &[Lead]) -> BTreeMap<LeadStatus, usize> {
    let mut counts = BTreeMap::new();
    for lead in leads {
        *counts.entry(lead.status).or_insert(0) += 1;
    }
    counts
}

/// Lead count per category, in category name order.
pub fn count_by_category(leads: &[Lead]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for lead in leads {
        *counts.entry(lead.category.clone()).or_insert(0) += 1;
    }
    counts
}
