//! Core record types for the dashboard.
//!
//! Every record is produced fresh by one parse call (or one snapshot fetch) and replaced
//! wholesale on the next; nothing here is persisted or merged incrementally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline status of a [`Lead`].
///
/// Parsing never produces a value outside this set: unrecognized status strings collapse to
/// [`LeadStatus::Warm`] (see [`crate::ingest::coerce::normalize_status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeadStatus {
    /// High-intent, priority conversion target.
    Hot,
    /// Default engagement level.
    Warm,
    /// Low current engagement.
    Cold,
    /// Deal closed/won.
    Closed,
    /// Opportunity lost.
    Lost,
}

impl LeadStatus {
    /// Canonical display name ("Hot", "Warm", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "Hot",
            Self::Warm => "Warm",
            Self::Cold => "Cold",
            Self::Closed => "Closed",
            Self::Lost => "Lost",
        }
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::Warm
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single sales lead.
///
/// Invariant: every field is populated. The field mapper applies a documented default for
/// anything absent or unparsable, so no `Lead` ever carries an undefined required field.
/// Date fields hold ISO-8601 date-time strings. `id` is unique within one parse batch and
/// regenerated on re-parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque batch-unique identifier, assigned at parse time.
    pub id: String,
    /// Client/customer name.
    pub client_name: String,
    /// Acquisition source (e.g. "LinkedIn", "Referral", "Direct").
    pub source: String,
    /// Segment/category (e.g. "Enterprise", "SME").
    pub category: String,
    /// Pipeline status.
    pub status: LeadStatus,
    /// Monthly recurring charge value; non-negative.
    pub mrc_value: f64,
    /// ISO-8601 date-time the lead entered the funnel.
    pub date_added: String,
    /// ISO-8601 date-time of last contact.
    pub last_contacted: String,
    /// ISO-8601 date-time of the next scheduled follow-up.
    pub next_follow_up: String,
    /// Account owner/manager.
    pub owner: String,
}

/// A single staff roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Opaque batch-unique identifier, assigned at parse time.
    pub id: String,
    /// Staff member name.
    pub name: String,
    /// Role/designation.
    pub designation: String,
    /// Whether the member is currently on duty.
    pub is_on_duty: bool,
    /// Current assignment, if any.
    pub current_assignment: Option<String>,
    /// Last reported location, if any.
    pub last_location: Option<String>,
}

/// A per-category operational target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalTarget {
    /// Segment/category the target applies to.
    pub category: String,
    /// Target monthly recurring charge value; non-negative.
    pub mrc_target: f64,
    /// Target lead count; non-negative.
    pub lead_goal: u32,
}

/// Utilization figures derived from a staff roster.
///
/// Always computed from a record set via [`ManpowerStats::from_roster`] (or supplied by a
/// snapshot source), never stored redundantly alongside the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManpowerStats {
    /// Total roster size.
    pub total: usize,
    /// Count on duty.
    pub present: usize,
    /// Count on duty and assigned.
    pub active: usize,
    /// Present but unassigned (`present - active`).
    pub available: usize,
}

impl ManpowerStats {
    /// Derive utilization stats from a roster.
    pub fn from_roster(roster: &[StaffMember]) -> Self {
        let present = roster.iter().filter(|s| s.is_on_duty).count();
        let active = roster
            .iter()
            .filter(|s| s.is_on_duty && s.current_assignment.is_some())
            .count();
        Self {
            total: roster.len(),
            present,
            active,
            available: present - active,
        }
    }

    /// Present-over-total utilization as a whole percentage; 0 for an empty roster.
    pub fn utilization_pct(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.present as f64 / self.total as f64) * 100.0).round() as u32
        }
    }
}

/// One full dashboard snapshot as returned by a [`crate::session::SnapshotSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Current lead funnel.
    pub leads: Vec<Lead>,
    /// Manpower utilization figures.
    pub manpower: ManpowerStats,
    /// Per-category operational targets.
    pub targets: Vec<OperationalTarget>,
    /// ISO-8601 timestamp of when the snapshot was produced.
    pub last_updated: String,
}
