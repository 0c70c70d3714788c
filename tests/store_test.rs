//! Record store integration tests

use filiera::graph::{seed, Direction, GraphError, Label, PropertyMap, Record, RecordStore};
use filiera::{EdgeKind, Snapshot};

#[test]
fn every_inserted_record_appears_exactly_once_under_its_label() {
    let store = seed::supply_chain();
    for record in store.records() {
        let matches = store
            .records_by_label(record.label)
            .iter()
            .filter(|r| r.id == record.id)
            .count();
        assert_eq!(matches, 1, "{} must appear exactly once", record.id);
    }
}

#[test]
fn every_edge_endpoint_resolves() {
    let store = seed::supply_chain();
    for edge in store.edges() {
        assert!(store.get(&edge.source).is_ok(), "dangling source {}", edge.source);
        assert!(store.get(&edge.target).is_ok(), "dangling target {}", edge.target);
    }
}

#[test]
fn constructing_a_dangling_edge_fails_with_not_found_class_errors() {
    let mut store = RecordStore::new();
    store
        .insert(Record::new("SUP001", Label::Supplier))
        .unwrap();

    let err = store
        .connect("SUP001", "GHOST", EdgeKind::Provides, PropertyMap::new())
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidEdgeTarget(_)));

    let err = store
        .connect("GHOST", "SUP001", EdgeKind::Provides, PropertyMap::new())
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidEdgeSource(_)));
}

#[test]
fn neighbor_traversal_matches_both_directions() {
    let store = seed::supply_chain();

    // FAC004 receives four materials
    let incoming = store
        .neighbors(&"FAC004".into(), EdgeKind::SuppliedTo, Direction::Incoming)
        .unwrap();
    assert_eq!(incoming.len(), 4);

    // and manufactures one product
    let outgoing = store
        .neighbors(&"FAC004".into(), EdgeKind::Manufactures, Direction::Outgoing)
        .unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].property_str("name"), Some("Cashmere Overcoat"));
}

#[test]
fn snapshot_roundtrip_preserves_the_graph() {
    let store = seed::supply_chain();
    let json = serde_json::to_string(&store.to_snapshot()).unwrap();

    let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
    let restored = RecordStore::from_snapshot(snapshot).unwrap();

    assert_eq!(restored.record_count(), store.record_count());
    assert_eq!(restored.edge_count(), store.edge_count());

    // Insertion order survives the roundtrip
    let original: Vec<&str> = store.records().map(|r| r.id.as_str()).collect();
    let reloaded: Vec<&str> = restored.records().map(|r| r.id.as_str()).collect();
    assert_eq!(original, reloaded);
}

#[test]
fn snapshot_with_dangling_edge_is_rejected_on_load() {
    let store = seed::supply_chain();
    let mut snapshot = store.to_snapshot();
    snapshot.edges[0].target = "GHOST".into();

    assert!(RecordStore::from_snapshot(snapshot).is_err());
}
