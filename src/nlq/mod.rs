//! Natural-language querying
//!
//! Translates a question into a structured plan, executes it against the
//! record store, and synthesizes a prose answer from the retrieved records.

pub mod client;
pub mod prompt;
pub mod traits;

pub use client::LlmClient;
pub use traits::{AnswerSynthesizer, QueryTranslator};

use crate::graph::{Record, RecordStore};
use crate::query::{Plan, PlanExecutor, QueryError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum NlqError {
    /// The translator returned output that cannot be parsed as a plan.
    /// Surfaced to the caller; never retried silently.
    #[error("translation failure: {0}")]
    Translation(String),

    /// The LLM endpoint could not be reached. Safe to retry; no state
    /// was mutated.
    #[error("LLM endpoint unavailable: {0}")]
    Unavailable(String),

    /// The LLM endpoint answered with an error.
    #[error("LLM API error: {0}")]
    Api(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

pub type NlqResult<T> = Result<T, NlqError>;

/// Answer to one natural-language question
#[derive(Debug, Clone, Serialize)]
pub struct NlqAnswer {
    pub question: String,
    pub plan: Plan,
    pub records: Vec<Record>,
    pub answer: String,
}

impl NlqAnswer {
    pub fn result_count(&self) -> usize {
        self.records.len()
    }
}

/// Translate → execute → synthesize pipeline over one record store
pub struct NlqPipeline<T, S> {
    store: Arc<RecordStore>,
    translator: T,
    synthesizer: S,
}

impl<T, S> NlqPipeline<T, S>
where
    T: QueryTranslator,
    S: AnswerSynthesizer,
{
    pub fn new(store: Arc<RecordStore>, translator: T, synthesizer: S) -> Self {
        Self {
            store,
            translator,
            synthesizer,
        }
    }

    /// Process one question end to end
    pub async fn answer(&self, question: &str) -> NlqResult<NlqAnswer> {
        let schema = self.store.schema();
        let plan = self.translator.translate(question, &schema).await?;
        info!(label = %plan.target_label, hops = plan.hops.len(), "translated plan");

        let records = PlanExecutor::new(&self.store).execute(&plan)?;
        info!(records = records.len(), "plan executed");

        let answer = self.synthesizer.synthesize(question, &records).await?;

        Ok(NlqAnswer {
            question: question.to_string(),
            plan,
            records,
            answer,
        })
    }
}
