//! Structured plans and their execution

pub mod executor;
pub mod plan;

pub use executor::PlanExecutor;
pub use plan::{FilterOp, Hop, Plan, PlanError, PropertyFilter};

use crate::graph::GraphError;
use thiserror::Error;

/// Errors raised during plan execution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

pub type QueryResult<T> = Result<T, QueryError>;
