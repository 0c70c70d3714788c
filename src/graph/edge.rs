//! Edge implementation — a directed, typed relationship between records

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeKind, RecordId};
use serde::{Deserialize, Serialize};

/// A directed edge in the provenance graph
///
/// Multiple edges between the same pair of records are permitted, including
/// edges of the same kind; the store does not deduplicate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source record (edge goes FROM this record)
    pub source: RecordId,

    /// Target record (edge goes TO this record)
    pub target: RecordId,

    /// Relationship type
    pub kind: EdgeKind,

    /// Flat scalar properties
    pub properties: PropertyMap,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(
        id: EdgeId,
        source: impl Into<RecordId>,
        target: impl Into<RecordId>,
        kind: EdgeKind,
    ) -> Self {
        Edge {
            id,
            source: source.into(),
            target: target.into(),
            kind,
            properties: PropertyMap::new(),
        }
    }

    /// Create a new edge with properties
    pub fn with_properties(
        id: EdgeId,
        source: impl Into<RecordId>,
        target: impl Into<RecordId>,
        kind: EdgeKind,
        properties: PropertyMap,
    ) -> Self {
        Edge {
            id,
            source: source.into(),
            target: target.into(),
            kind,
            properties,
        }
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Check if this edge goes FROM a specific record
    pub fn starts_from(&self, record: &RecordId) -> bool {
        &self.source == record
    }

    /// Check if this edge goes TO a specific record
    pub fn ends_at(&self, record: &RecordId) -> bool {
        &self.target == record
    }
}
