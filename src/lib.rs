//! Filiera — supply chain provenance graph
//!
//! An in-memory record store over a luxury fashion supply chain (suppliers,
//! materials, factories, certifications, collections, products), an
//! LLM-assisted natural-language query pipeline, and a confidence-gated
//! human-in-the-loop approval workflow for certifications.
//!
//! # Example
//!
//! ```rust
//! use filiera::graph::{seed, EdgeKind, Label};
//! use filiera::query::{Hop, Plan, PlanExecutor, PropertyFilter};
//!
//! let store = seed::supply_chain();
//! assert_eq!(store.record_count(), 28);
//!
//! // Which materials come from Florence suppliers?
//! let plan = Plan::scan(Label::Supplier)
//!     .with_filter(PropertyFilter::contains("location", "Florence"))
//!     .with_hop(Hop::outgoing(EdgeKind::Provides));
//! let materials = PlanExecutor::new(&store).execute(&plan).unwrap();
//! assert!(!materials.is_empty());
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod nlq;
pub mod query;
pub mod validation;

// Re-export main types for convenience
pub use config::{LlmConfig, LlmProvider};
pub use graph::{
    Direction, Edge, EdgeId, EdgeKind, GraphError, GraphResult, Label, PropertyMap,
    PropertyValue, Record, RecordId, RecordStore, SchemaSummary, Snapshot,
};
pub use nlq::{
    AnswerSynthesizer, LlmClient, NlqAnswer, NlqError, NlqPipeline, NlqResult, QueryTranslator,
};
pub use query::{
    FilterOp, Hop, Plan, PlanError, PlanExecutor, PropertyFilter, QueryError, QueryResult,
};
pub use validation::{
    ApprovalWorkflow, Assessment, AuditEntry, ConfidenceAssessor, ConfidenceTier, LlmAssessor,
    ReviewDecision, RuleBasedAssessor, ValidationError, ValidationReport, ValidationResult,
    ValidationState, ValidationStatus, ValidationSummary, WorkflowOutcome, WorkflowState,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
