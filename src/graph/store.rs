//! In-memory record storage
//!
//! Read-mostly store: populated once, then shared immutably. Record lookup
//! by id is O(1); label filters and neighbor traversal are linear scans,
//! which is the intended trade-off for a store of this size.

use super::edge::Edge;
use super::property::PropertyMap;
use super::record::Record;
use super::types::{Direction, EdgeId, EdgeKind, Label, RecordId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("record {0} not found")]
    NotFound(RecordId),

    #[error("record {0} already exists")]
    DuplicateId(RecordId),

    #[error("invalid edge: source record {0} does not exist")]
    InvalidEdgeSource(RecordId),

    #[error("invalid edge: target record {0} does not exist")]
    InvalidEdgeTarget(RecordId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory record store
///
/// Records live in an insertion-ordered map (RecordId -> Record), so
/// label-filtered scans return records in the order they were inserted.
/// Edges live in a flat list; traversal scans it.
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Record storage, insertion-ordered
    records: IndexMap<RecordId, Record>,

    /// Edge storage
    edges: Vec<Edge>,

    /// Next edge id
    next_edge_id: u64,
}

impl RecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        RecordStore {
            records: IndexMap::new(),
            edges: Vec::new(),
            next_edge_id: 1,
        }
    }

    /// Insert a record. Fails if the id is already taken.
    pub fn insert(&mut self, record: Record) -> GraphResult<RecordId> {
        if self.records.contains_key(&record.id) {
            return Err(GraphError::DuplicateId(record.id.clone()));
        }
        let id = record.id.clone();
        debug!(record = %id, label = %record.label, "insert record");
        self.records.insert(id.clone(), record);
        Ok(id)
    }

    /// Create a directed edge between two existing records
    ///
    /// Both endpoints must already exist; a dangling reference is rejected
    /// at construction, so stored edges always resolve.
    pub fn connect(
        &mut self,
        source: impl Into<RecordId>,
        target: impl Into<RecordId>,
        kind: EdgeKind,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId> {
        let source = source.into();
        let target = target.into();

        if !self.records.contains_key(&source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.records.contains_key(&target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        debug!(%source, %target, kind = %kind, "connect");
        self.edges
            .push(Edge::with_properties(id, source, target, kind, properties));
        Ok(id)
    }

    /// Look up a record by id
    pub fn get(&self, id: &RecordId) -> GraphResult<&Record> {
        self.records
            .get(id)
            .ok_or_else(|| GraphError::NotFound(id.clone()))
    }

    /// Check whether a record exists
    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    /// All records with the given label, in insertion order
    pub fn records_by_label(&self, label: Label) -> Vec<&Record> {
        self.records
            .values()
            .filter(|r| r.label == label)
            .collect()
    }

    /// All records, in insertion order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbor records reachable over edges of `kind`, relative to `id`
    ///
    /// `Outgoing` follows edges where `id` is the source and yields targets;
    /// `Incoming` follows edges where `id` is the target and yields sources.
    /// Fails with NotFound if `id` itself is absent.
    pub fn neighbors(
        &self,
        id: &RecordId,
        kind: EdgeKind,
        direction: Direction,
    ) -> GraphResult<Vec<&Record>> {
        if !self.records.contains_key(id) {
            return Err(GraphError::NotFound(id.clone()));
        }

        let mut out = Vec::new();
        for edge in &self.edges {
            if edge.kind != kind {
                continue;
            }
            let neighbor_id = match direction {
                Direction::Outgoing if edge.starts_from(id) => &edge.target,
                Direction::Incoming if edge.ends_at(id) => &edge.source,
                _ => continue,
            };
            // Edge endpoints are validated in connect(), so this resolves.
            let neighbor = self.get(neighbor_id)?;
            out.push(neighbor);
        }
        Ok(out)
    }

    /// Number of records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Summarize the schema actually present in the store
    pub fn schema(&self) -> SchemaSummary {
        let mut labels = Vec::new();
        for label in Label::ALL {
            let records = self.records_by_label(label);
            if records.is_empty() {
                continue;
            }
            let sample_keys = records[0]
                .properties
                .keys()
                .map(|k| k.to_string())
                .collect();
            labels.push(LabelSummary {
                label,
                count: records.len(),
                sample_keys,
            });
        }

        let mut edge_kinds = Vec::new();
        for kind in EdgeKind::ALL {
            let count = self.edges.iter().filter(|e| e.kind == kind).count();
            if count == 0 {
                continue;
            }
            // First edge of this kind shows the endpoint labels
            let sample = self.edges.iter().find(|e| e.kind == kind);
            let endpoints = sample.and_then(|e| {
                let from = self.records.get(&e.source)?.label;
                let to = self.records.get(&e.target)?.label;
                Some((from, to))
            });
            edge_kinds.push(EdgeKindSummary {
                kind,
                count,
                endpoints,
            });
        }

        SchemaSummary {
            labels,
            edge_kinds,
            record_count: self.record_count(),
            edge_count: self.edge_count(),
        }
    }

    /// Export all records and edges as a flat snapshot
    ///
    /// The snapshot layout is an implementation detail consumed only by
    /// `from_snapshot`.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.records.values().cloned().collect(),
            edges: self
                .edges
                .iter()
                .map(|e| SnapshotEdge {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    kind: e.kind,
                    properties: e.properties.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild a store from a snapshot, re-validating every edge endpoint
    pub fn from_snapshot(snapshot: Snapshot) -> GraphResult<Self> {
        let mut store = RecordStore::new();
        for record in snapshot.records {
            store.insert(record)?;
        }
        for edge in snapshot.edges {
            store.connect(edge.source, edge.target, edge.kind, edge.properties)?;
        }
        Ok(store)
    }
}

/// Per-label portion of a schema summary
#[derive(Debug, Clone, Serialize)]
pub struct LabelSummary {
    pub label: Label,
    pub count: usize,
    pub sample_keys: Vec<String>,
}

/// Per-edge-kind portion of a schema summary
#[derive(Debug, Clone, Serialize)]
pub struct EdgeKindSummary {
    pub kind: EdgeKind,
    pub count: usize,
    pub endpoints: Option<(Label, Label)>,
}

/// Description of the labels, edge kinds, and sizes present in a store
///
/// Rendered into the query-translation prompt so the model knows what it
/// can ask for.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaSummary {
    pub labels: Vec<LabelSummary>,
    pub edge_kinds: Vec<EdgeKindSummary>,
    pub record_count: usize,
    pub edge_count: usize,
}

impl SchemaSummary {
    /// Human-readable rendering for prompt construction
    pub fn describe(&self) -> String {
        let mut out = String::from("Supply Chain Graph Schema:\n\nRecord Types:\n");
        for l in &self.labels {
            out.push_str(&format!(
                "  - {} ({} records): {}\n",
                l.label,
                l.count,
                l.sample_keys.join(", ")
            ));
        }
        out.push_str("\nRelationship Types:\n");
        for e in &self.edge_kinds {
            match e.endpoints {
                Some((from, to)) => {
                    out.push_str(&format!("  - ({})-[{}]->({})\n", from, e.kind, to))
                }
                None => out.push_str(&format!("  - [{}]\n", e.kind)),
            }
        }
        out.push_str(&format!(
            "\nTotal Records: {}\nTotal Relationships: {}\n",
            self.record_count, self.edge_count
        ));
        out
    }
}

/// Flat export of a store's records and edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<Record>,
    pub edges: Vec<SnapshotEdge>,
}

/// Edge entry within a snapshot; ids are reassigned on load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: RecordId,
    pub target: RecordId,
    pub kind: EdgeKind,
    pub properties: PropertyMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_store() -> RecordStore {
        let mut store = RecordStore::new();
        store
            .insert(Record::new("SUP001", Label::Supplier))
            .unwrap();
        store
            .insert(Record::new("MAT001", Label::Material))
            .unwrap();
        store
            .connect("SUP001", "MAT001", EdgeKind::Provides, PropertyMap::new())
            .unwrap();
        store
    }

    #[test]
    fn test_insert_and_get() {
        let store = small_store();
        assert_eq!(store.record_count(), 2);
        assert_eq!(store.get(&"SUP001".into()).unwrap().label, Label::Supplier);
        assert_eq!(
            store.get(&"SUP999".into()),
            Err(GraphError::NotFound("SUP999".into()))
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = small_store();
        let err = store
            .insert(Record::new("SUP001", Label::Supplier))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateId("SUP001".into()));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut store = small_store();
        let err = store
            .connect("SUP001", "MAT999", EdgeKind::Provides, PropertyMap::new())
            .unwrap_err();
        assert_eq!(err, GraphError::InvalidEdgeTarget("MAT999".into()));

        let err = store
            .connect("SUP999", "MAT001", EdgeKind::Provides, PropertyMap::new())
            .unwrap_err();
        assert_eq!(err, GraphError::InvalidEdgeSource("SUP999".into()));
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut store = small_store();
        store
            .connect("SUP001", "MAT001", EdgeKind::Provides, PropertyMap::new())
            .unwrap();
        assert_eq!(store.edge_count(), 2);

        // Traversal sees the duplicate endpoint twice; dedup is the
        // executor's job.
        let materials = store
            .neighbors(&"SUP001".into(), EdgeKind::Provides, Direction::Outgoing)
            .unwrap();
        assert_eq!(materials.len(), 2);
    }

    #[test]
    fn test_neighbors_both_directions() {
        let store = small_store();
        let materials = store
            .neighbors(&"SUP001".into(), EdgeKind::Provides, Direction::Outgoing)
            .unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].id, "MAT001".into());

        let suppliers = store
            .neighbors(&"MAT001".into(), EdgeKind::Provides, Direction::Incoming)
            .unwrap();
        assert_eq!(suppliers.len(), 1);
        assert_eq!(suppliers[0].id, "SUP001".into());

        // Wrong kind yields empty, missing record yields NotFound
        assert!(store
            .neighbors(&"SUP001".into(), EdgeKind::PartOf, Direction::Outgoing)
            .unwrap()
            .is_empty());
        assert!(matches!(
            store.neighbors(&"NOPE".into(), EdgeKind::Provides, Direction::Outgoing),
            Err(GraphError::NotFound(_))
        ));
    }

    #[test]
    fn test_label_scan_insertion_order() {
        let mut store = RecordStore::new();
        for id in ["SUP003", "SUP001", "SUP002"] {
            store.insert(Record::new(id, Label::Supplier)).unwrap();
        }
        let ids: Vec<&str> = store
            .records_by_label(Label::Supplier)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["SUP003", "SUP001", "SUP002"]);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let store = small_store();
        let json = serde_json::to_string(&store.to_snapshot()).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        let restored = RecordStore::from_snapshot(snapshot).unwrap();
        assert_eq!(restored.record_count(), 2);
        assert_eq!(restored.edge_count(), 1);
        assert!(restored.contains(&"SUP001".into()));
    }

    #[test]
    fn test_schema_summary() {
        let store = small_store();
        let schema = store.schema();
        assert_eq!(schema.labels.len(), 2);
        assert_eq!(schema.edge_kinds.len(), 1);
        let text = schema.describe();
        assert!(text.contains("(Supplier)-[PROVIDES]->(Material)"));
    }
}
