//! `funnel-analytics` is the data core of a sales/operations dashboard: it ingests messy
//! uploaded CSV files into typed records, derives the aggregates the views render, and mirrors
//! records back out as CSV.
//!
//! The primary entrypoint is [`ingest::parse_document`], which sniffs the header line to pick
//! a record schema and maps columns by keyword rather than exact name: uploaded spreadsheets
//! rarely agree on column naming, so the pipeline trades strictness for tolerance and a bad
//! cell always resolves to a documented default instead of rejecting its row.
//!
//! ## What you can parse
//!
//! One CSV document, classified from its header into one of:
//!
//! - **leads**: sales funnel rows ([`types::Lead`], status always one of
//!   Hot/Warm/Cold/Closed/Lost)
//! - **staff**: roster rows ([`types::StaffMember`])
//! - **targets**: per-category operational targets ([`types::OperationalTarget`])
//!
//! Inputs that are too short parse to [`ingest::ParseOutcome::NoData`]; headers that match no
//! schema parse to [`ingest::ParseOutcome::Unrecognized`]. Neither is an error.
//!
//! ## Quick example
//!
//! ```
//! use funnel_analytics::ingest::{parse_document, ParseOptions, ParseOutcome};
//! use funnel_analytics::types::LeadStatus;
//!
//! let raw = "\
//! Client Name,Source,Status,MRC Value,Next Follow-up Date
//! Acme Corp,LinkedIn,HOT!!,\"$12,000\",2024-01-01
//! ";
//!
//! let ParseOutcome::Leads(leads) = parse_document(raw, &ParseOptions::default()) else {
//!     panic!("expected a leads document");
//! };
//! assert_eq!(leads[0].status, LeadStatus::Hot);
//! assert_eq!(leads[0].mrc_value, 12000.0);
//! assert_eq!(leads[0].next_follow_up, "2024-01-01T00:00:00.000Z");
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: tokenizer, schema classifier, field mappers, coercions, parse observers
//! - [`types`]: record and snapshot types
//! - [`aggregate`]: pure reducers (filters, totals, breakdowns) feeding the views
//! - [`followup`]: overdue detection and follow-up buckets
//! - [`export`]: CSV export mirror path
//! - [`session`]: remote-snapshot vs uploaded-data precedence
//! - [`summary`]: executive-summary prompt building with a fail-open backend seam
//! - [`error`]: shared error type

pub mod aggregate;
pub mod error;
pub mod export;
pub mod followup;
pub mod ingest;
pub mod session;
pub mod summary;
pub mod types;

pub use error::{DashboardError, DashboardResult};
