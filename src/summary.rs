//! Executive-summary generation.
//!
//! The generative backend is an external collaborator behind [`InsightBackend`]; this module
//! owns the deterministic parts (building the prompt from aggregates) and the failure policy
//! (fail open with a fixed fallback string, never an error to the UI).

use std::collections::BTreeMap;

use crate::aggregate::{count_by_category, count_by_status, total_mrc_value};
use crate::error::DashboardResult;
use crate::types::{Lead, ManpowerStats};

/// Shown when the insight backend fails or returns nothing usable.
pub const FALLBACK_SUMMARY: &str =
    "Executive insights are unavailable right now. The dashboard data below is unaffected; \
     please retry once the insight service is reachable.";

/// A text-generation backend. Implementations wrap whatever generative API is configured.
pub trait InsightBackend {
    /// Generate free-form text for `prompt`.
    fn generate(&self, prompt: &str) -> DashboardResult<String>;
}

/// Build the consultant-style prompt from the currently filtered data.
///
/// Deterministic for a given input: breakdown maps are ordered and serialized as JSON.
pub fn build_insight_prompt(leads: &[Lead], manpower: &ManpowerStats) -> String {
    let by_status: BTreeMap<&str, usize> = count_by_status(leads)
        .into_iter()
        .map(|(status, count)| (status.as_str(), count))
        .collect();
    let status_json = serde_json::to_string(&by_status).unwrap_or_else(|_| "{}".to_string());
    let category_json =
        serde_json::to_string(&count_by_category(leads)).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are an expert business consultant. Analyze the following dashboard data and \
         provide a high-level executive summary.\n\
         \n\
         Data Summary:\n\
         - Total Leads in View: {leads_len}\n\
         - Total MRC Value: ${total_mrc}\n\
         - Lead Status Breakdown: {status_json}\n\
         - Lead Category Breakdown: {category_json}\n\
         - Manpower: {present} present out of {total} total staff ({utilization}% utilization).\n\
         \n\
         Please provide:\n\
         1. A brief \"Pulse Check\" on the current situation.\n\
         2. Top 3 Strategic Recommendations (Actionable).\n\
         3. One potential risk factor to monitor.\n\
         \n\
         Keep the tone professional, concise, and executive-ready. Format the output with \
         clear headings and bullet points.",
        leads_len = leads.len(),
        total_mrc = total_mrc_value(leads),
        present = manpower.present,
        total = manpower.total,
        utilization = manpower.utilization_pct(),
    )
}

/// Generate an executive summary, falling back to [`FALLBACK_SUMMARY`] when the backend fails
/// or produces empty text. Backend errors are logged to stderr and never propagated.
pub fn executive_summary(
    backend: &dyn InsightBackend,
    leads: &[Lead],
    manpower: &ManpowerStats,
) -> String {
    let prompt = build_insight_prompt(leads, manpower);
    match backend.generate(&prompt) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => FALLBACK_SUMMARY.to_string(),
        Err(err) => {
            eprintln!("[summary][fail] err={err}");
            FALLBACK_SUMMARY.to_string()
        }
    }
}
