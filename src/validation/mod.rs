//! Certification validation: confidence-gated approval workflow
//!
//! One validation run assesses a certification record, computes a confidence
//! tier, and routes to auto-approval or a human-review checkpoint, producing
//! a final decision record with a full audit trail.

pub mod assessor;
pub mod workflow;

pub use assessor::{Assessment, ConfidenceAssessor, LlmAssessor, RuleBasedAssessor};
pub use workflow::{ApprovalWorkflow, WorkflowOutcome, WorkflowState};

use crate::graph::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised by the approval workflow
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("certification {0} not found")]
    NotFound(RecordId),

    #[error("record {0} is not a certification")]
    NotACertification(RecordId),

    /// The external assessor was unreachable. The run is not persisted,
    /// so it is safe to retry.
    #[error("confidence assessor unavailable for {certification_id}: {reason}")]
    AssessorUnavailable {
        certification_id: RecordId,
        reason: String,
    },

    /// Resume was called for a certification with no suspended run.
    /// A finalized run is not an error: `resume` returns its existing
    /// report unchanged.
    #[error("certification {0} has no review pending")]
    InvalidTransition(RecordId),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Three-level classification of how trustworthy a certification's data is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// One tier lower; Low is the floor
    pub fn lowered(self) -> Self {
        match self {
            ConfidenceTier::High => ConfidenceTier::Medium,
            ConfidenceTier::Medium | ConfidenceTier::Low => ConfidenceTier::Low,
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceTier::High => "High",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// Status of one validation run
///
/// Moves only forward: pending -> {auto_approved | approved | rejected}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Pending,
    AutoApproved,
    Approved,
    Rejected,
}

impl ValidationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ValidationStatus::Pending)
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationStatus::Pending => "pending",
            ValidationStatus::AutoApproved => "auto_approved",
            ValidationStatus::Approved => "approved",
            ValidationStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// The human reviewer's verdict for a suspended run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve { notes: Option<String> },
    Reject { notes: Option<String> },
}

impl ReviewDecision {
    pub fn approve() -> Self {
        ReviewDecision::Approve { notes: None }
    }

    pub fn reject() -> Self {
        ReviewDecision::Reject { notes: None }
    }

    pub fn notes(&self) -> Option<&str> {
        match self {
            ReviewDecision::Approve { notes } | ReviewDecision::Reject { notes } => {
                notes.as_deref()
            }
        }
    }

    /// The terminal status this decision produces
    pub fn status(&self) -> ValidationStatus {
        match self {
            ReviewDecision::Approve { .. } => ValidationStatus::Approved,
            ReviewDecision::Reject { .. } => ValidationStatus::Rejected,
        }
    }
}

/// One entry of the append-only audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub state: String,
    pub timestamp: DateTime<Utc>,
    pub detail: String,
}

impl AuditEntry {
    pub fn new(state: &str, detail: impl Into<String>) -> Self {
        AuditEntry {
            state: state.to_string(),
            timestamp: Utc::now(),
            detail: detail.into(),
        }
    }
}

/// Mutable record of one certification's progress through the workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationState {
    pub certification_id: RecordId,
    pub tier: Option<ConfidenceTier>,
    pub status: ValidationStatus,
    pub assessment: String,
    pub human_feedback: Option<String>,
    pub audit: Vec<AuditEntry>,
}

impl ValidationState {
    pub fn new(certification_id: RecordId) -> Self {
        ValidationState {
            certification_id,
            tier: None,
            status: ValidationStatus::Pending,
            assessment: String::new(),
            human_feedback: None,
            audit: Vec::new(),
        }
    }
}

/// Final decision record for one certification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub certification_id: RecordId,
    pub certification_name: String,
    pub certification_type: String,
    pub issuing_body: String,
    pub valid_until: String,
    pub verification_url: String,
    pub status: ValidationStatus,
    pub tier: Option<ConfidenceTier>,
    pub assessment: String,
    pub human_feedback: Option<String>,
    pub audit: Vec<AuditEntry>,
}

/// Aggregate view over all runs held by a workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub pending: usize,
    pub auto_approved: usize,
    pub approved: usize,
    pub rejected: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_lowering_floors_at_low() {
        assert_eq!(ConfidenceTier::High.lowered(), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::Medium.lowered(), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::Low.lowered(), ConfidenceTier::Low);
    }

    #[test]
    fn test_status_terminality() {
        assert!(!ValidationStatus::Pending.is_terminal());
        assert!(ValidationStatus::AutoApproved.is_terminal());
        assert!(ValidationStatus::Approved.is_terminal());
        assert!(ValidationStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&ValidationStatus::AutoApproved).unwrap();
        assert_eq!(json, "\"auto_approved\"");
    }

    #[test]
    fn test_decision_status() {
        assert_eq!(ReviewDecision::approve().status(), ValidationStatus::Approved);
        assert_eq!(ReviewDecision::reject().status(), ValidationStatus::Rejected);
        let with_notes = ReviewDecision::Reject {
            notes: Some("document mismatch".to_string()),
        };
        assert_eq!(with_notes.notes(), Some("document mismatch"));
    }
}
