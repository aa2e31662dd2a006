use funnel_analytics::ingest::{parse_document, ParseOptions, ParseOutcome, SchemaKind};

#[test]
fn fewer_than_two_non_blank_lines_is_no_data() {
    let opts = ParseOptions::default();
    for raw in ["", "\n\n", "   \n", "Client Name,Status\n", "Client Name,Status\n   \n"] {
        let outcome = parse_document(raw, &opts);
        assert_eq!(outcome, ParseOutcome::NoData, "input {raw:?}");
        assert_eq!(outcome.schema(), None);
    }
}

#[test]
fn unknown_header_is_a_distinct_condition_from_no_data() {
    let outcome = parse_document("foo,bar\n1,2\n", &ParseOptions::default());
    assert_eq!(outcome, ParseOutcome::Unrecognized);
    assert_ne!(outcome, ParseOutcome::NoData);
}

#[test]
fn classifier_priority_is_leads_then_staff_then_targets() {
    // Both "client" and "goal" present: leads wins.
    let outcome = parse_document("Client Name,Lead Goal\nAcme,10\n", &ParseOptions::default());
    assert_eq!(outcome.schema(), Some(SchemaKind::Leads));

    // Both "designation" and "target" present: staff wins.
    let outcome = parse_document("Designation,Target\nManager,5\n", &ParseOptions::default());
    assert_eq!(outcome.schema(), Some(SchemaKind::Staff));
}

#[test]
fn staff_example_parses_off_duty_member() {
    let raw = "Staff Name,Designation,On Duty (Yes/No)\nA,Manager,No\n";
    let outcome = parse_document(raw, &ParseOptions::default());
    assert_eq!(outcome.schema(), Some(SchemaKind::Staff));

    let ParseOutcome::Staff(members) = outcome else {
        unreachable!()
    };
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "A");
    assert_eq!(members[0].designation, "Manager");
    assert!(!members[0].is_on_duty);
}

#[test]
fn target_sheet_dispatches_to_targets() {
    let raw = "Category,MRC Target,Lead Goal\nEnterprise,\"₹2,50,000\",40\nSME,60000,120\n";
    let ParseOutcome::Targets(targets) = parse_document(raw, &ParseOptions::default()) else {
        panic!("expected targets");
    };
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].category, "Enterprise");
    assert_eq!(targets[0].mrc_target, 250000.0);
    assert_eq!(targets[1].lead_goal, 120);
}

#[test]
fn forced_schema_overrides_the_sniffer() {
    let raw = "Client,Status\nAcme,Hot\n";
    let opts = ParseOptions {
        schema: Some(SchemaKind::Staff),
        ..Default::default()
    };
    let outcome = parse_document(raw, &opts);
    assert_eq!(outcome.schema(), Some(SchemaKind::Staff));
    // No staff keyword matches these headers, so the record is fully defaulted.
    let ParseOutcome::Staff(members) = outcome else {
        unreachable!()
    };
    assert_eq!(members[0].name, "Unnamed Staff");
}
