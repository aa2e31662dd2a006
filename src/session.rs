//! Dashboard session state: remote snapshots vs uploaded CSV data.
//!
//! One precedence rule governs the two sources: while an uploaded record set is installed, the
//! periodic remote refresh is skipped entirely, so a background sync can never clobber data the
//! user just uploaded. A failed fetch keeps the last-known snapshot.

use std::thread;
use std::time::Duration;

use chrono::Utc;

use crate::error::{DashboardError, DashboardResult};
use crate::ingest::coerce::to_iso;
use crate::ingest::{parse_document, ParseOptions, ParseOutcome};
use crate::types::{DashboardSnapshot, Lead, LeadStatus, ManpowerStats, OperationalTarget};

/// A remote (or remote-like) provider of full dashboard snapshots.
///
/// Implementations must be treated as fallible; callers keep showing last-known state on error.
pub trait SnapshotSource {
    /// Fetch one full snapshot.
    fn fetch_snapshot(&self) -> DashboardResult<DashboardSnapshot>;
}

/// Simulated master feed: returns a fixed sample snapshot after a fixed delay, standing in for
/// the real spreadsheet-backed source.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    /// Simulated network latency.
    pub latency: Duration,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(800),
        }
    }
}

impl SnapshotSource for SimulatedSource {
    fn fetch_snapshot(&self) -> DashboardResult<DashboardSnapshot> {
        thread::sleep(self.latency);
        Ok(sample_snapshot())
    }
}

/// The sample snapshot served by [`SimulatedSource`]. Follow-up dates are relative to today so
/// the overdue view always has content.
pub fn sample_snapshot() -> DashboardSnapshot {
    let day = |offset: i64| to_iso(Utc::now() + chrono::Duration::days(offset));
    let lead = |idx: usize,
                name: &str,
                source: &str,
                category: &str,
                status: LeadStatus,
                mrc: f64,
                follow_up_offset: i64,
                owner: &str| Lead {
        id: format!("master-{idx}"),
        client_name: name.to_string(),
        source: source.to_string(),
        category: category.to_string(),
        status,
        mrc_value: mrc,
        date_added: "2024-02-10T00:00:00.000Z".to_string(),
        last_contacted: "2024-03-01T00:00:00.000Z".to_string(),
        next_follow_up: day(follow_up_offset),
        owner: owner.to_string(),
    };

    DashboardSnapshot {
        leads: vec![
            lead(1, "Tata Steel", "LinkedIn", "Enterprise", LeadStatus::Hot, 45000.0, -2, "Gulzar Khan"),
            lead(2, "Reliance Retail", "Referral", "Enterprise", LeadStatus::Warm, 12500.0, 1, "Amit Singh"),
            lead(3, "Zomato HQ", "Direct", "Enterprise", LeadStatus::Hot, 8500.0, 0, "Gulzar Khan"),
            lead(4, "Blinkit Delivery", "Website", "SME", LeadStatus::Cold, 2800.0, 5, "Priya Verma"),
            lead(5, "Adani Green", "LinkedIn", "Enterprise", LeadStatus::Warm, 23200.0, -1, "Amit Singh"),
            lead(6, "Paytm Payments", "Google Ads", "Enterprise", LeadStatus::Closed, 15500.0, 30, "Gulzar Khan"),
            lead(7, "Nykaa Beauty", "Direct", "SME", LeadStatus::Hot, 3950.0, 2, "Priya Verma"),
            lead(8, "Oyo Rooms", "Website", "SME", LeadStatus::Warm, 4100.0, -5, "Amit Singh"),
        ],
        manpower: ManpowerStats {
            total: 210,
            present: 185,
            active: 142,
            available: 43,
        },
        targets: vec![
            OperationalTarget {
                category: "Enterprise".to_string(),
                mrc_target: 250000.0,
                lead_goal: 40,
            },
            OperationalTarget {
                category: "SME".to_string(),
                mrc_target: 60000.0,
                lead_goal: 120,
            },
        ],
        last_updated: to_iso(Utc::now()),
    }
}

/// What a refresh attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// A new snapshot was fetched and installed.
    Refreshed,
    /// Uploaded data is installed; the remote fetch was not attempted.
    SkippedLocalData,
}

/// Session state for one dashboard instance.
///
/// Record sets are replaced wholesale: an upload atomically swaps the displayed funnel, and
/// clearing it falls back to the last-known snapshot.
#[derive(Debug, Default)]
pub struct DashboardSession {
    snapshot: Option<DashboardSnapshot>,
    uploaded: Option<Vec<Lead>>,
}

impl DashboardSession {
    /// Create an empty session (no snapshot, no upload).
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from `source`, honoring upload precedence.
    ///
    /// Skips the fetch entirely while uploaded data is installed. On fetch failure the
    /// last-known snapshot is kept and the error is returned for the caller to log.
    pub fn refresh(&mut self, source: &dyn SnapshotSource) -> DashboardResult<RefreshStatus> {
        if self.uploaded.is_some() {
            return Ok(RefreshStatus::SkippedLocalData);
        }
        let snapshot = source.fetch_snapshot()?;
        self.snapshot = Some(snapshot);
        Ok(RefreshStatus::Refreshed)
    }

    /// Parse `raw` as an uploaded leads file and install it as the active funnel.
    ///
    /// Returns the number of leads installed. `NoData`, unrecognized headers, and files that
    /// classify as a different schema are surfaced as errors; the previous state is untouched
    /// in every failure case.
    pub fn upload_leads(&mut self, raw: &str, options: &ParseOptions) -> DashboardResult<usize> {
        match parse_document(raw, options) {
            ParseOutcome::NoData => Err(DashboardError::NoData),
            ParseOutcome::Unrecognized => Err(DashboardError::UnrecognizedFormat),
            ParseOutcome::Leads(leads) => {
                if leads.is_empty() {
                    return Err(DashboardError::NoData);
                }
                let count = leads.len();
                self.uploaded = Some(leads);
                Ok(count)
            }
            other => Err(DashboardError::WrongSchema {
                expected: "leads",
                // NoData/Unrecognized are handled above, so a schema is always present here.
                actual: other.schema().map(|s| s.as_str()).unwrap_or("unknown"),
            }),
        }
    }

    /// Discard uploaded data; the next [`Self::refresh`] resumes the remote sync.
    pub fn clear_upload(&mut self) {
        self.uploaded = None;
    }

    /// Whether an uploaded record set is currently installed.
    pub fn has_local_data(&self) -> bool {
        self.uploaded.is_some()
    }

    /// The leads currently backing the dashboard: uploaded data when present, otherwise the
    /// last-known snapshot, otherwise nothing.
    pub fn current_leads(&self) -> &[Lead] {
        if let Some(uploaded) = &self.uploaded {
            return uploaded;
        }
        self.snapshot.as_ref().map(|s| s.leads.as_slice()).unwrap_or(&[])
    }

    /// Last-known remote snapshot, if any fetch has succeeded.
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    /// Timestamp of the last successful remote fetch.
    pub fn last_updated(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.last_updated.as_str())
    }
}
