//! Plan execution against the record store
//!
//! Executes label scan, then property filters, then relationship hops. The
//! working set after each stage keeps store iteration order; an empty result
//! is not an error.

use super::plan::Plan;
use super::{QueryError, QueryResult};
use crate::graph::{Record, RecordId, RecordStore};
use std::collections::HashSet;
use tracing::debug;

/// Executes retrieval plans against a store
pub struct PlanExecutor<'a> {
    store: &'a RecordStore,
}

impl<'a> PlanExecutor<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Run a plan to completion and return the final working set
    pub fn execute(&self, plan: &Plan) -> QueryResult<Vec<Record>> {
        let mut working: Vec<&Record> = self.store.records_by_label(plan.target_label);
        debug!(
            label = %plan.target_label,
            candidates = working.len(),
            "label scan"
        );

        for filter in &plan.property_filters {
            working.retain(|r| filter.matches(r.property(&filter.key)));
        }
        debug!(filtered = working.len(), "property filters applied");

        for hop in &plan.hops {
            let mut next: Vec<&Record> = Vec::new();
            let mut seen: HashSet<&RecordId> = HashSet::new();
            for record in &working {
                let neighbors = self
                    .store
                    .neighbors(&record.id, hop.kind, hop.direction)
                    .map_err(QueryError::Graph)?;
                for neighbor in neighbors {
                    if seen.insert(&neighbor.id) {
                        next.push(neighbor);
                    }
                }
            }
            debug!(kind = %hop.kind, ?hop.direction, set = next.len(), "hop");
            working = next;
        }

        Ok(working.into_iter().cloned().collect())
    }
}
