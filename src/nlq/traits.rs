//! Capability seams for the external text-generation collaborators
//!
//! The pipeline and the workflow depend on these narrow traits, never on a
//! concrete LLM client, so both stay testable with deterministic stand-ins.

use super::NlqResult;
use crate::graph::{Record, SchemaSummary};
use crate::query::Plan;
use async_trait::async_trait;

/// Maps a natural-language question plus a schema description to a plan
#[async_trait]
pub trait QueryTranslator: Send + Sync {
    async fn translate(&self, question: &str, schema: &SchemaSummary) -> NlqResult<Plan>;
}

/// Turns the original question plus retrieved records into prose
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    async fn synthesize(&self, question: &str, records: &[Record]) -> NlqResult<String>;
}
