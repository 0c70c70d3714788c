//! Provenance graph data model and in-memory store

pub mod edge;
pub mod property;
pub mod record;
pub mod seed;
pub mod store;
pub mod types;

pub use edge::Edge;
pub use property::{PropertyMap, PropertyValue};
pub use record::Record;
pub use store::{
    GraphError, GraphResult, RecordStore, SchemaSummary, Snapshot, SnapshotEdge,
};
pub use types::{Direction, EdgeId, EdgeKind, Label, RecordId, UnknownName};
