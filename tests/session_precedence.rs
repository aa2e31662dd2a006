use std::sync::atomic::{AtomicUsize, Ordering};

use funnel_analytics::error::DashboardError;
use funnel_analytics::ingest::ParseOptions;
use funnel_analytics::session::{
    sample_snapshot, DashboardSession, RefreshStatus, SnapshotSource,
};
use funnel_analytics::types::DashboardSnapshot;
use funnel_analytics::DashboardResult;

/// Counts fetches so tests can prove the refresh was (not) attempted.
#[derive(Default)]
struct CountingSource {
    fetches: AtomicUsize,
}

impl CountingSource {
    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for CountingSource {
    fn fetch_snapshot(&self) -> DashboardResult<DashboardSnapshot> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(sample_snapshot())
    }
}

const LEADS_CSV: &str = "\
Client Name,Status,MRC Value
Acme Corp,Hot,\"$12,000\"
Beta LLC,Cold,500
";

#[test]
fn upload_replaces_funnel_and_suppresses_refresh() {
    let source = CountingSource::default();
    let mut session = DashboardSession::new();

    session.refresh(&source).unwrap();
    assert_eq!(source.fetch_count(), 1);
    assert_eq!(session.current_leads().len(), 8);

    let installed = session
        .upload_leads(LEADS_CSV, &ParseOptions::default())
        .unwrap();
    assert_eq!(installed, 2);
    assert!(session.has_local_data());
    assert_eq!(session.current_leads().len(), 2);
    assert_eq!(session.current_leads()[0].client_name, "Acme Corp");

    // The periodic refresh must not even attempt a fetch while uploaded data is installed.
    let status = session.refresh(&source).unwrap();
    assert_eq!(status, RefreshStatus::SkippedLocalData);
    assert_eq!(source.fetch_count(), 1);
    assert_eq!(session.current_leads().len(), 2);
}

#[test]
fn clearing_the_upload_resumes_the_remote_sync() {
    let source = CountingSource::default();
    let mut session = DashboardSession::new();
    session.upload_leads(LEADS_CSV, &ParseOptions::default()).unwrap();

    session.clear_upload();
    assert!(!session.has_local_data());

    let status = session.refresh(&source).unwrap();
    assert_eq!(status, RefreshStatus::Refreshed);
    assert_eq!(source.fetch_count(), 1);
    assert_eq!(session.current_leads().len(), 8);
    assert!(session.last_updated().is_some());
}

#[test]
fn bad_uploads_leave_the_session_untouched() {
    let mut session = DashboardSession::new();
    session.upload_leads(LEADS_CSV, &ParseOptions::default()).unwrap();

    let err = session
        .upload_leads("", &ParseOptions::default())
        .unwrap_err();
    assert!(matches!(err, DashboardError::NoData));

    let err = session
        .upload_leads("foo,bar\n1,2\n", &ParseOptions::default())
        .unwrap_err();
    assert!(matches!(err, DashboardError::UnrecognizedFormat));

    let err = session
        .upload_leads(
            "Staff Name,Designation\nA,Manager\n",
            &ParseOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        DashboardError::WrongSchema {
            expected: "leads",
            actual: "staff",
        }
    ));

    // The previous upload is still the active funnel.
    assert_eq!(session.current_leads().len(), 2);
}
