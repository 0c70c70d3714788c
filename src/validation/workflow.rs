//! Approval workflow state machine
//!
//! Assess -> {AutoApprove | RequestHumanReview} -> ProcessFeedback ->
//! Finalize. The only suspension point is the human-review checkpoint: the
//! run's state is kept in the workflow and resumed later from the reviewer's
//! decision. A pending review has no timeout; it waits for an explicit
//! operator action.

use super::{
    AuditEntry, ConfidenceAssessor, ConfidenceTier, ReviewDecision, ValidationError,
    ValidationReport, ValidationResult, ValidationState, ValidationStatus, ValidationSummary,
};
use crate::graph::{Label, RecordId, RecordStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// The workflow's states; allowed successors are enumerated in one place
/// (`successors`) so illegal transitions cannot be written by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Assess,
    AutoApprove,
    RequestHumanReview,
    ProcessFeedback,
    Finalize,
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Assess => "assess",
            WorkflowState::AutoApprove => "auto_approve",
            WorkflowState::RequestHumanReview => "request_human_review",
            WorkflowState::ProcessFeedback => "process_feedback",
            WorkflowState::Finalize => "finalize",
        }
    }

    /// The complete transition table
    pub fn successors(&self) -> &'static [WorkflowState] {
        match self {
            WorkflowState::Assess => {
                &[WorkflowState::AutoApprove, WorkflowState::RequestHumanReview]
            }
            WorkflowState::AutoApprove => &[WorkflowState::Finalize],
            WorkflowState::RequestHumanReview => &[WorkflowState::ProcessFeedback],
            WorkflowState::ProcessFeedback => &[WorkflowState::Finalize],
            WorkflowState::Finalize => &[],
        }
    }

    /// Routing decision after assessment
    pub fn route(tier: ConfidenceTier) -> WorkflowState {
        match tier {
            ConfidenceTier::High => WorkflowState::AutoApprove,
            ConfidenceTier::Medium | ConfidenceTier::Low => WorkflowState::RequestHumanReview,
        }
    }
}

/// Result of driving a run as far as it can go
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// The run reached a terminal status
    Finalized(ValidationReport),
    /// The run is suspended awaiting a human decision
    PendingReview(ValidationState),
}

/// Confidence-gated approval workflow over one record store
///
/// Holds the state of every run it has started, keyed by certification id;
/// a run left pending stays here until `resume` is called.
pub struct ApprovalWorkflow<A> {
    store: Arc<RecordStore>,
    assessor: A,
    runs: HashMap<RecordId, ValidationState>,
}

impl<A: ConfidenceAssessor> ApprovalWorkflow<A> {
    pub fn new(store: Arc<RecordStore>, assessor: A) -> Self {
        ApprovalWorkflow {
            store,
            assessor,
            runs: HashMap::new(),
        }
    }

    /// Start (or re-enter) a validation run for one certification
    ///
    /// High confidence auto-approves and finalizes in one call; otherwise
    /// the run suspends at the human-review checkpoint. Calling `begin`
    /// again for the same id returns the stored outcome without recomputing
    /// or appending audit entries.
    #[instrument(skip(self), fields(certification = %certification_id))]
    pub async fn begin(&mut self, certification_id: &RecordId) -> ValidationResult<WorkflowOutcome> {
        // Re-entry: never reassess, never mutate a finished or suspended run
        if let Some(existing) = self.runs.get(certification_id) {
            return if existing.status.is_terminal() {
                Ok(WorkflowOutcome::Finalized(self.build_report(existing)?))
            } else {
                Ok(WorkflowOutcome::PendingReview(existing.clone()))
            };
        }

        let record = self
            .store
            .get(certification_id)
            .map_err(|_| ValidationError::NotFound(certification_id.clone()))?;
        if record.label != Label::Certification {
            return Err(ValidationError::NotACertification(certification_id.clone()));
        }

        // Assessor failure leaves no trace; the caller can retry
        let assessment = self.assessor.assess(record).await?;
        info!(tier = %assessment.tier, "assessed");

        let mut state = ValidationState::new(certification_id.clone());
        state.tier = Some(assessment.tier);
        state.assessment = assessment.rationale.clone();
        state.audit.push(AuditEntry::new(
            WorkflowState::Assess.name(),
            format!("confidence tier {}: {}", assessment.tier, assessment.rationale),
        ));

        match WorkflowState::route(assessment.tier) {
            WorkflowState::AutoApprove => {
                state.audit.push(AuditEntry::new(
                    WorkflowState::AutoApprove.name(),
                    "high confidence, approved without review",
                ));
                state.status = ValidationStatus::AutoApproved;
                state.human_feedback = Some("Not required - High confidence".to_string());
                Self::finalize(&mut state);
                let report = self.build_report(&state)?;
                self.runs.insert(certification_id.clone(), state);
                Ok(WorkflowOutcome::Finalized(report))
            }
            _ => {
                state.audit.push(AuditEntry::new(
                    WorkflowState::RequestHumanReview.name(),
                    format!("tier {} requires human review", assessment.tier),
                ));
                info!("suspended for human review");
                let snapshot = state.clone();
                self.runs.insert(certification_id.clone(), state);
                Ok(WorkflowOutcome::PendingReview(snapshot))
            }
        }
    }

    /// Resume a suspended run with the reviewer's decision
    ///
    /// A run already finalized returns its existing report unchanged; an id
    /// with no suspended run is rejected.
    #[instrument(skip(self, decision), fields(certification = %certification_id))]
    pub async fn resume(
        &mut self,
        certification_id: &RecordId,
        decision: ReviewDecision,
    ) -> ValidationResult<WorkflowOutcome> {
        let Some(state) = self.runs.get_mut(certification_id) else {
            return Err(ValidationError::InvalidTransition(certification_id.clone()));
        };
        if state.status.is_terminal() {
            let snapshot = state.clone();
            let report = self.build_report(&snapshot)?;
            return Ok(WorkflowOutcome::Finalized(report));
        }

        let status = decision.status();
        let feedback = decision.notes().map(str::to_string).unwrap_or_else(|| {
            match status {
                ValidationStatus::Approved => "Approved after manual verification".to_string(),
                _ => "Rejected - requires further investigation".to_string(),
            }
        });
        state.audit.push(AuditEntry::new(
            WorkflowState::ProcessFeedback.name(),
            format!("reviewer decision: {} ({})", status, feedback),
        ));
        state.status = status;
        state.human_feedback = Some(feedback);
        Self::finalize(state);
        info!(status = %state.status, "finalized after review");

        let snapshot = state.clone();
        let report = self.build_report(&snapshot)?;
        Ok(WorkflowOutcome::Finalized(report))
    }

    /// Append the finalize audit entry exactly once
    fn finalize(state: &mut ValidationState) {
        debug_assert!(state.status.is_terminal());
        let already_finalized = state
            .audit
            .iter()
            .any(|e| e.state == WorkflowState::Finalize.name());
        if !already_finalized {
            state.audit.push(AuditEntry::new(
                WorkflowState::Finalize.name(),
                format!("final status: {}", state.status),
            ));
        }
    }

    /// Current state of a run, if one exists
    pub fn state(&self, certification_id: &RecordId) -> Option<&ValidationState> {
        self.runs.get(certification_id)
    }

    /// Decision record for a run (terminal or not)
    pub fn report(&self, certification_id: &RecordId) -> ValidationResult<ValidationReport> {
        let state = self
            .runs
            .get(certification_id)
            .ok_or_else(|| ValidationError::NotFound(certification_id.clone()))?;
        self.build_report(state)
    }

    /// Validate several certifications; pending ones suspend individually
    pub async fn begin_many(
        &mut self,
        certification_ids: &[RecordId],
    ) -> Vec<ValidationResult<WorkflowOutcome>> {
        let mut outcomes = Vec::with_capacity(certification_ids.len());
        for id in certification_ids {
            outcomes.push(self.begin(id).await);
        }
        outcomes
    }

    /// Aggregate counts over all runs
    pub fn summary(&self) -> ValidationSummary {
        let mut summary = ValidationSummary::default();
        for state in self.runs.values() {
            summary.total += 1;
            match state.status {
                ValidationStatus::Pending => summary.pending += 1,
                ValidationStatus::AutoApproved => summary.auto_approved += 1,
                ValidationStatus::Approved => summary.approved += 1,
                ValidationStatus::Rejected => summary.rejected += 1,
            }
            match state.tier {
                Some(ConfidenceTier::High) => summary.high_confidence += 1,
                Some(ConfidenceTier::Medium) => summary.medium_confidence += 1,
                Some(ConfidenceTier::Low) => summary.low_confidence += 1,
                None => {}
            }
        }
        summary
    }

    fn build_report(&self, state: &ValidationState) -> ValidationResult<ValidationReport> {
        let record = self
            .store
            .get(&state.certification_id)
            .map_err(|_| ValidationError::NotFound(state.certification_id.clone()))?;
        let field = |key: &str| {
            record
                .property_str(key)
                .unwrap_or("Unknown")
                .to_string()
        };
        Ok(ValidationReport {
            certification_id: state.certification_id.clone(),
            certification_name: field("name"),
            certification_type: field("type"),
            issuing_body: field("issuing_body"),
            valid_until: field("valid_until"),
            verification_url: field("verification_url"),
            status: state.status,
            tier: state.tier,
            assessment: state.assessment.clone(),
            human_feedback: state.human_feedback.clone(),
            audit: state.audit.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{seed, Record};
    use crate::validation::{Assessment, ValidationError};
    use async_trait::async_trait;

    /// Assessor with a scripted tier, for exercising routing in isolation
    struct FixedAssessor(ConfidenceTier);

    #[async_trait]
    impl ConfidenceAssessor for FixedAssessor {
        async fn assess(&self, _record: &Record) -> ValidationResult<Assessment> {
            Ok(Assessment {
                tier: self.0,
                rationale: "scripted".to_string(),
            })
        }
    }

    /// Assessor that is always down
    struct DownAssessor;

    #[async_trait]
    impl ConfidenceAssessor for DownAssessor {
        async fn assess(&self, record: &Record) -> ValidationResult<Assessment> {
            Err(ValidationError::AssessorUnavailable {
                certification_id: record.id.clone(),
                reason: "connection refused".to_string(),
            })
        }
    }

    fn workflow(tier: ConfidenceTier) -> ApprovalWorkflow<FixedAssessor> {
        ApprovalWorkflow::new(Arc::new(seed::supply_chain()), FixedAssessor(tier))
    }

    #[test]
    fn test_transition_table() {
        use WorkflowState::*;
        assert_eq!(Assess.successors(), &[AutoApprove, RequestHumanReview]);
        assert_eq!(AutoApprove.successors(), &[Finalize]);
        assert_eq!(RequestHumanReview.successors(), &[ProcessFeedback]);
        assert_eq!(ProcessFeedback.successors(), &[Finalize]);
        assert!(Finalize.successors().is_empty());

        assert_eq!(WorkflowState::route(ConfidenceTier::High), AutoApprove);
        assert_eq!(WorkflowState::route(ConfidenceTier::Medium), RequestHumanReview);
        assert_eq!(WorkflowState::route(ConfidenceTier::Low), RequestHumanReview);
    }

    #[tokio::test]
    async fn test_high_tier_auto_approves() {
        let mut wf = workflow(ConfidenceTier::High);
        let outcome = wf.begin(&"CERT001".into()).await.unwrap();
        let WorkflowOutcome::Finalized(report) = outcome else {
            panic!("expected finalized outcome");
        };
        assert_eq!(report.status, ValidationStatus::AutoApproved);
        assert_eq!(report.certification_name, "Made in Italy");
        let states: Vec<&str> = report.audit.iter().map(|e| e.state.as_str()).collect();
        assert_eq!(states, vec!["assess", "auto_approve", "finalize"]);
    }

    #[tokio::test]
    async fn test_medium_tier_suspends_then_approves() {
        let mut wf = workflow(ConfidenceTier::Medium);
        let outcome = wf.begin(&"CERT004".into()).await.unwrap();
        assert!(matches!(outcome, WorkflowOutcome::PendingReview(_)));
        assert_eq!(
            wf.state(&"CERT004".into()).unwrap().status,
            ValidationStatus::Pending
        );

        let outcome = wf
            .resume(&"CERT004".into(), ReviewDecision::approve())
            .await
            .unwrap();
        let WorkflowOutcome::Finalized(report) = outcome else {
            panic!("expected finalized outcome");
        };
        assert_eq!(report.status, ValidationStatus::Approved);
        assert_eq!(
            report.human_feedback.as_deref(),
            Some("Approved after manual verification")
        );
    }

    #[tokio::test]
    async fn test_begin_is_idempotent_on_finalized_run() {
        let mut wf = workflow(ConfidenceTier::High);
        let first = wf.begin(&"CERT002".into()).await.unwrap();
        let second = wf.begin(&"CERT002".into()).await.unwrap();
        assert_eq!(first, second);

        let report = wf.report(&"CERT002".into()).unwrap();
        assert_eq!(
            report.audit.iter().filter(|e| e.state == "finalize").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_begin_is_idempotent_on_pending_run() {
        let mut wf = workflow(ConfidenceTier::Low);
        let first = wf.begin(&"CERT003".into()).await.unwrap();
        let second = wf.begin(&"CERT003".into()).await.unwrap();
        assert_eq!(first, second);
        // Still exactly one assess entry
        let state = wf.state(&"CERT003".into()).unwrap();
        assert_eq!(state.audit.iter().filter(|e| e.state == "assess").count(), 1);
    }

    #[tokio::test]
    async fn test_resume_without_pending_run_is_rejected() {
        let mut wf = workflow(ConfidenceTier::High);
        let err = wf
            .resume(&"CERT001".into(), ReviewDecision::approve())
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn test_resume_on_finalized_returns_existing_result() {
        let mut wf = workflow(ConfidenceTier::Medium);
        wf.begin(&"CERT005".into()).await.unwrap();
        let first = wf
            .resume(&"CERT005".into(), ReviewDecision::reject())
            .await
            .unwrap();

        // A second decision cannot flip the outcome
        let second = wf
            .resume(&"CERT005".into(), ReviewDecision::approve())
            .await
            .unwrap();
        assert_eq!(first, second);
        let WorkflowOutcome::Finalized(report) = second else {
            panic!("expected finalized outcome");
        };
        assert_eq!(report.status, ValidationStatus::Rejected);
    }

    #[tokio::test]
    async fn test_unknown_and_mistyped_ids() {
        let mut wf = workflow(ConfidenceTier::High);
        assert!(matches!(
            wf.begin(&"CERT999".into()).await.unwrap_err(),
            ValidationError::NotFound(_)
        ));
        assert!(matches!(
            wf.begin(&"SUP001".into()).await.unwrap_err(),
            ValidationError::NotACertification(_)
        ));
    }

    #[tokio::test]
    async fn test_assessor_outage_leaves_no_state() {
        let mut wf =
            ApprovalWorkflow::new(Arc::new(seed::supply_chain()), DownAssessor);
        let err = wf.begin(&"CERT001".into()).await.unwrap_err();
        assert!(matches!(err, ValidationError::AssessorUnavailable { .. }));
        assert!(wf.state(&"CERT001".into()).is_none());
        assert_eq!(wf.summary().total, 0);
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let mut wf = workflow(ConfidenceTier::Medium);
        wf.begin_many(&["CERT001".into(), "CERT002".into()]).await;
        wf.resume(&"CERT001".into(), ReviewDecision::approve())
            .await
            .unwrap();

        let summary = wf.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.approved, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.medium_confidence, 2);
    }
}
