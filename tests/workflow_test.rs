//! End-to-end approval workflow scenarios with the deterministic assessor

use chrono::NaiveDate;
use filiera::graph::{Label, PropertyMap, Record, RecordStore};
use filiera::validation::{
    ApprovalWorkflow, ConfidenceTier, ReviewDecision, RuleBasedAssessor, ValidationError,
    ValidationStatus, WorkflowOutcome,
};
use std::sync::Arc;

fn certification(id: &str, fields: &[(&str, &str)]) -> Record {
    let props: PropertyMap = fields
        .iter()
        .map(|(k, v)| (k.to_string(), (*v).into()))
        .collect();
    Record::with_properties(id, Label::Certification, props)
}

fn store_with(records: Vec<Record>) -> Arc<RecordStore> {
    let mut store = RecordStore::new();
    for record in records {
        store.insert(record).unwrap();
    }
    Arc::new(store)
}

fn assessor() -> RuleBasedAssessor {
    RuleBasedAssessor::with_reference_date(NaiveDate::from_ymd_opt(2026, 8, 24).unwrap())
}

/// Expired validity ⇒ Low ⇒ human review ⇒ reject ⇒ rejected.
#[tokio::test]
async fn expired_certification_is_reviewed_and_rejected() {
    let store = store_with(vec![certification(
        "CERT100",
        &[
            ("name", "CITES Permit"),
            ("issuing_body", "CITES"),
            ("valid_until", "2024-12-31"),
            ("verification_url", "https://cites.org"),
        ],
    )]);
    let mut workflow = ApprovalWorkflow::new(store, assessor());

    let outcome = workflow.begin(&"CERT100".into()).await.unwrap();
    let WorkflowOutcome::PendingReview(state) = outcome else {
        panic!("expired certification must suspend for review");
    };
    assert_eq!(state.tier, Some(ConfidenceTier::Low));
    assert_eq!(state.status, ValidationStatus::Pending);

    let outcome = workflow
        .resume(&"CERT100".into(), ReviewDecision::reject())
        .await
        .unwrap();
    let WorkflowOutcome::Finalized(report) = outcome else {
        panic!("resume must finalize");
    };
    assert_eq!(report.status, ValidationStatus::Rejected);
    assert_eq!(report.tier, Some(ConfidenceTier::Low));
}

/// Future validity, known issuing body, verification reference present
/// ⇒ High ⇒ auto-approved without a review step.
#[tokio::test]
async fn complete_current_certification_auto_approves() {
    let store = store_with(vec![certification(
        "CERT200",
        &[
            ("name", "ISO 9001:2015"),
            ("type", "Quality Management"),
            ("issuing_body", "International Organization for Standardization"),
            ("valid_until", "2099-09-01"),
            ("verification_url", "https://www.iso.org"),
        ],
    )]);
    let mut workflow = ApprovalWorkflow::new(store, assessor());

    let outcome = workflow.begin(&"CERT200".into()).await.unwrap();
    let WorkflowOutcome::Finalized(report) = outcome else {
        panic!("high confidence must finalize in one call");
    };
    assert_eq!(report.status, ValidationStatus::AutoApproved);
    assert_eq!(report.tier, Some(ConfidenceTier::High));
    assert!(report
        .audit
        .iter()
        .all(|e| e.state != "request_human_review"));
}

#[tokio::test]
async fn finalize_is_idempotent_and_audit_does_not_grow() {
    let store = store_with(vec![certification(
        "CERT200",
        &[
            ("name", "ISO 9001:2015"),
            ("issuing_body", "ISO"),
            ("valid_until", "2099-09-01"),
            ("verification_url", "https://www.iso.org"),
        ],
    )]);
    let mut workflow = ApprovalWorkflow::new(store, assessor());

    let first = workflow.begin(&"CERT200".into()).await.unwrap();
    let second = workflow.begin(&"CERT200".into()).await.unwrap();
    assert_eq!(first, second);

    let report = workflow.report(&"CERT200".into()).unwrap();
    assert_eq!(report.audit.len(), 3); // assess, auto_approve, finalize
}

#[tokio::test]
async fn status_never_reverts_to_pending() {
    let store = store_with(vec![certification(
        "CERT300",
        &[
            ("name", "SA 8000"),
            ("issuing_body", "Social Accountability International"),
            ("valid_until", "2020-11-01"),
            ("verification_url", "https://sa-intl.org"),
        ],
    )]);
    let mut workflow = ApprovalWorkflow::new(store, assessor());

    workflow.begin(&"CERT300".into()).await.unwrap();
    workflow
        .resume(&"CERT300".into(), ReviewDecision::approve())
        .await
        .unwrap();
    assert_eq!(
        workflow.state(&"CERT300".into()).unwrap().status,
        ValidationStatus::Approved
    );

    // Neither a fresh begin nor another decision reopens the run
    workflow.begin(&"CERT300".into()).await.unwrap();
    workflow
        .resume(&"CERT300".into(), ReviewDecision::reject())
        .await
        .unwrap();
    assert_eq!(
        workflow.state(&"CERT300".into()).unwrap().status,
        ValidationStatus::Approved
    );
}

/// A decision for a run that was never started is an invalid transition;
/// nothing is recorded for the id.
#[tokio::test]
async fn resume_without_a_suspended_run_is_an_invalid_transition() {
    let store = store_with(vec![certification(
        "CERT600",
        &[("name", "Unvalidated Certificate"), ("valid_until", "2099-01-01")],
    )]);
    let mut workflow = ApprovalWorkflow::new(store, assessor());

    let err = workflow
        .resume(&"CERT600".into(), ReviewDecision::approve())
        .await
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidTransition(_)));
    assert!(workflow.state(&"CERT600".into()).is_none());
}

#[tokio::test]
async fn reviewer_notes_are_carried_into_the_report() {
    let store = store_with(vec![certification(
        "CERT400",
        &[
            ("name", "GOTS Organic"),
            ("valid_until", "2099-03-15"),
            ("verification_url", "https://global-standard.org"),
        ],
    )]);
    let mut workflow = ApprovalWorkflow::new(store, assessor());

    // Missing issuing body: Medium, suspends
    let outcome = workflow.begin(&"CERT400".into()).await.unwrap();
    assert!(matches!(outcome, WorkflowOutcome::PendingReview(_)));

    let outcome = workflow
        .resume(
            &"CERT400".into(),
            ReviewDecision::Approve {
                notes: Some("Issuer confirmed by phone".to_string()),
            },
        )
        .await
        .unwrap();
    let WorkflowOutcome::Finalized(report) = outcome else {
        panic!("resume must finalize");
    };
    assert_eq!(report.human_feedback.as_deref(), Some("Issuer confirmed by phone"));
    assert_eq!(report.status, ValidationStatus::Approved);
}

#[tokio::test]
async fn audit_trail_records_every_transition_in_order() {
    let store = store_with(vec![certification(
        "CERT500",
        &[("name", "Bare Certificate"), ("valid_until", "2020-01-01")],
    )]);
    let mut workflow = ApprovalWorkflow::new(store, assessor());

    workflow.begin(&"CERT500".into()).await.unwrap();
    workflow
        .resume(&"CERT500".into(), ReviewDecision::reject())
        .await
        .unwrap();

    let report = workflow.report(&"CERT500".into()).unwrap();
    let states: Vec<&str> = report.audit.iter().map(|e| e.state.as_str()).collect();
    assert_eq!(
        states,
        vec!["assess", "request_human_review", "process_feedback", "finalize"]
    );
    // Timestamps never go backwards
    for pair in report.audit.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}
