// Tests for the snapshot archive

use waypoint_core::{GraphError, GraphStore, NodeId, Position, Snapshot, SnapshotArchive};

fn sample_store() -> GraphStore {
    let mut store = GraphStore::default();
    store.add_node(NodeId::from("A"), Position::new(0, 0)).unwrap();
    store.add_node(NodeId::from("B"), Position::new(4, 2)).unwrap();
    store
        .add_edge(&NodeId::from("A"), &NodeId::from("B"), 6)
        .unwrap();
    store
}

// ============================================================================
// Save / Load Tests
// ============================================================================

#[test]
fn test_save_and_load() {
    let store = sample_store();
    let mut archive = SnapshotArchive::new();

    archive.save("first", Snapshot::capture(store.view()));
    let snapshot = archive.load("first").unwrap();

    assert!(snapshot.matches(store.view()));
    assert_eq!(snapshot.stats().node_count, 2);
    assert_eq!(snapshot.stats().edge_count, 1);
}

#[test]
fn test_load_unknown_snapshot() {
    let archive = SnapshotArchive::new();
    assert_eq!(
        archive.load("missing"),
        Err(GraphError::UnknownSnapshot("missing".to_string()))
    );
}

#[test]
fn test_save_overwrites() {
    let mut store = sample_store();
    let mut archive = SnapshotArchive::new();
    archive.save("g", Snapshot::capture(store.view()));

    store.add_node(NodeId::from("C"), Position::new(1, 1)).unwrap();
    archive.save("g", Snapshot::capture(store.view()));

    assert_eq!(archive.len(), 1);
    assert_eq!(archive.load("g").unwrap().nodes.len(), 3);
}

#[test]
fn test_snapshot_is_independent_of_store() {
    let mut store = sample_store();
    let mut archive = SnapshotArchive::new();
    archive.save("g", Snapshot::capture(store.view()));

    store
        .add_edge(&NodeId::from("A"), &NodeId::from("B"), 1)
        .unwrap();
    store.clear();

    let snapshot = archive.load("g").unwrap();
    assert_eq!(snapshot.edges[0].cost, 6);
    assert_eq!(snapshot.nodes[1], (NodeId::from("B"), Position::new(4, 2)));
}

#[test]
fn test_loaded_copy_cannot_change_archive() {
    let mut archive = SnapshotArchive::new();
    archive.save("g", Snapshot::capture(sample_store().view()));

    let mut copy = archive.load("g").unwrap();
    copy.nodes.clear();

    assert_eq!(archive.load("g").unwrap().nodes.len(), 2);
}

#[test]
fn test_snapshot_matches_detects_differences() {
    let mut store = sample_store();
    let snapshot = Snapshot::capture(store.view());

    store
        .add_edge(&NodeId::from("A"), &NodeId::from("B"), 2)
        .unwrap();
    assert!(!snapshot.matches(store.view()));
}

// ============================================================================
// Listing / Delete Tests
// ============================================================================

#[test]
fn test_list_is_sorted() {
    let view = sample_store().snapshot_view();
    let mut archive = SnapshotArchive::new();
    archive.save("zeta", Snapshot::capture(&view));
    archive.save("alpha", Snapshot::capture(&view));
    archive.save("mid", Snapshot::capture(&view));

    assert_eq!(archive.list(), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_list_empty() {
    let archive = SnapshotArchive::new();
    assert!(archive.list().is_empty());
    assert!(archive.is_empty());
}

#[test]
fn test_describe() {
    let mut archive = SnapshotArchive::new();
    archive.save("g", Snapshot::capture(sample_store().view()));

    let infos = archive.describe();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].name, "g");
    assert_eq!(infos[0].stats.node_count, 2);
    assert_eq!(infos[0].stats.edge_count, 1);
}

#[test]
fn test_delete() {
    let mut archive = SnapshotArchive::new();
    archive.save("g", Snapshot::capture(sample_store().view()));

    archive.delete("g").unwrap();
    assert!(!archive.contains("g"));
    assert_eq!(
        archive.delete("g"),
        Err(GraphError::UnknownSnapshot("g".to_string()))
    );
}
