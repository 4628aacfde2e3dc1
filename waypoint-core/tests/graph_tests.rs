// Tests for the graph store

use waypoint_core::{CanvasBounds, GraphError, GraphStore, MAX_COST, NodeId, Position};

fn store_with(ids: &[&str]) -> GraphStore {
    let mut store = GraphStore::default();
    for (i, id) in ids.iter().enumerate() {
        store
            .add_node(NodeId::from(*id), Position::new(i as i32, i as i32))
            .unwrap();
    }
    store
}

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

// ============================================================================
// Node Tests
// ============================================================================

#[test]
fn test_add_node() {
    let mut store = GraphStore::default();
    store.add_node(id("A"), Position::new(3, 4)).unwrap();

    assert!(store.view().contains(&id("A")));
    assert_eq!(store.view().position(&id("A")), Some(Position::new(3, 4)));
    assert_eq!(store.view().node_count(), 1);
}

#[test]
fn test_add_duplicate_node_fails() {
    let mut store = store_with(&["A"]);
    let result = store.add_node(id("A"), Position::new(9, 9));

    assert_eq!(result, Err(GraphError::DuplicateNode(id("A"))));
    assert_eq!(store.view().position(&id("A")), Some(Position::new(0, 0)));
    assert_eq!(store.view().node_count(), 1);
}

#[test]
fn test_add_node_on_canvas_edges() {
    let mut store = GraphStore::default();
    assert!(store.add_node(id("low"), Position::new(0, 0)).is_ok());
    assert!(store.add_node(id("high"), Position::new(10, 10)).is_ok());
}

#[test]
fn test_add_node_out_of_bounds() {
    let mut store = GraphStore::default();

    let result = store.add_node(id("A"), Position::new(11, 0));
    assert_eq!(
        result,
        Err(GraphError::PositionOutOfBounds { x: 11, y: 0, min: 0, max: 10 })
    );
    assert!(matches!(
        store.add_node(id("B"), Position::new(0, -1)),
        Err(GraphError::PositionOutOfBounds { .. })
    ));
    assert!(store.view().is_empty());
}

#[test]
fn test_custom_bounds() {
    let mut store = GraphStore::new(CanvasBounds::new(0, 20));
    assert!(store.add_node(id("A"), Position::new(20, 15)).is_ok());
    assert!(store.add_node(id("B"), Position::new(21, 15)).is_err());
}

#[test]
fn test_next_node_id_counts_nodes() {
    let mut store = GraphStore::default();
    assert_eq!(store.next_node_id(), id("Node 1"));

    store.add_node(store.next_node_id(), Position::new(0, 0)).unwrap();
    store.add_node(store.next_node_id(), Position::new(1, 0)).unwrap();
    assert_eq!(store.next_node_id(), id("Node 3"));

    store.clear();
    assert_eq!(store.next_node_id(), id("Node 1"));
}

#[test]
fn test_nodes_keep_insertion_order() {
    let store = store_with(&["C", "A", "B"]);
    let order: Vec<&str> = store.view().nodes().map(|(id, _)| id.as_str()).collect();
    assert_eq!(order, vec!["C", "A", "B"]);
}

// ============================================================================
// Edge Tests
// ============================================================================

#[test]
fn test_add_edge() {
    let mut store = store_with(&["A", "B"]);
    store.add_edge(&id("A"), &id("B"), 4).unwrap();

    assert_eq!(store.view().edge_count(), 1);
    assert_eq!(store.view().weight(&id("A"), &id("B")), Some(4));
    assert_eq!(store.view().weight(&id("B"), &id("A")), Some(4));
}

#[test]
fn test_add_edge_overwrites_weight() {
    let mut store = store_with(&["A", "B"]);
    store.add_edge(&id("A"), &id("B"), 4).unwrap();
    store.add_edge(&id("B"), &id("A"), 9).unwrap();

    let edges = store.view().edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].cost, 9);
    assert_eq!(store.view().weight(&id("A"), &id("B")), Some(9));
}

#[test]
fn test_add_edge_unknown_node() {
    let mut store = store_with(&["A"]);

    assert_eq!(
        store.add_edge(&id("A"), &id("Z"), 1),
        Err(GraphError::UnknownNode(id("Z")))
    );
    assert_eq!(
        store.add_edge(&id("Y"), &id("A"), 1),
        Err(GraphError::UnknownNode(id("Y")))
    );
    assert_eq!(store.view().edge_count(), 0);
}

#[test]
fn test_add_edge_self_loop() {
    let mut store = store_with(&["A"]);
    assert_eq!(
        store.add_edge(&id("A"), &id("A"), 3),
        Err(GraphError::SelfLoop(id("A")))
    );
    assert_eq!(store.view().edge_count(), 0);
}

#[test]
fn test_add_edge_invalid_weight() {
    let mut store = store_with(&["A", "B"]);

    assert_eq!(
        store.add_edge(&id("A"), &id("B"), 0),
        Err(GraphError::InvalidWeight(0))
    );
    assert_eq!(
        store.add_edge(&id("A"), &id("B"), -5),
        Err(GraphError::InvalidWeight(-5))
    );
    assert_eq!(store.view().edge_count(), 0);
}

#[test]
fn test_add_edge_weight_upper_bound() {
    let mut store = store_with(&["A", "B"]);

    assert_eq!(
        store.add_edge(&id("A"), &id("B"), MAX_COST + 1),
        Err(GraphError::InvalidWeight(MAX_COST + 1))
    );
    assert_eq!(store.view().edge_count(), 0);

    store.add_edge(&id("A"), &id("B"), MAX_COST).unwrap();
    assert_eq!(store.view().weight(&id("A"), &id("B")), Some(MAX_COST));
}

#[test]
fn test_failed_overwrite_keeps_old_weight() {
    let mut store = store_with(&["A", "B"]);
    store.add_edge(&id("A"), &id("B"), 2).unwrap();

    assert!(store.add_edge(&id("A"), &id("B"), 0).is_err());
    assert_eq!(store.view().weight(&id("A"), &id("B")), Some(2));
}

#[test]
fn test_neighbors() {
    let mut store = store_with(&["A", "B", "C"]);
    store.add_edge(&id("A"), &id("C"), 7).unwrap();
    store.add_edge(&id("A"), &id("B"), 2).unwrap();

    let neighbors = store.view().neighbors(&id("A")).unwrap();
    assert_eq!(neighbors, vec![(id("B"), 2), (id("C"), 7)]);
    assert_eq!(store.view().neighbors(&id("Z")), None);
}

#[test]
fn test_edges_listed_once_in_canonical_order() {
    let mut store = store_with(&["A", "B", "C"]);
    store.add_edge(&id("C"), &id("B"), 3).unwrap();
    store.add_edge(&id("B"), &id("A"), 1).unwrap();

    let pairs: Vec<(String, String)> = store
        .view()
        .edges()
        .into_iter()
        .map(|e| (e.a.to_string(), e.b.to_string()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "C".to_string())
        ]
    );
}

// ============================================================================
// Clear / Snapshot View Tests
// ============================================================================

#[test]
fn test_clear() {
    let mut store = store_with(&["A", "B"]);
    store.add_edge(&id("A"), &id("B"), 1).unwrap();
    store.clear();

    assert!(store.view().is_empty());
    assert_eq!(store.view().edge_count(), 0);
    assert_eq!(store.view().position(&id("A")), None);
}

#[test]
fn test_snapshot_view_is_isolated() {
    let mut store = store_with(&["A", "B"]);
    let before = store.snapshot_view();

    store.add_edge(&id("A"), &id("B"), 1).unwrap();
    store.add_node(id("C"), Position::new(5, 5)).unwrap();

    assert_eq!(before.node_count(), 2);
    assert_eq!(before.edge_count(), 0);
    assert_eq!(store.view().node_count(), 3);
}

#[test]
fn test_revision_tracks_successful_mutations() {
    let mut store = store_with(&["A", "B"]);
    let start = store.revision();

    assert!(store.add_edge(&id("A"), &id("A"), 1).is_err());
    assert_eq!(store.revision(), start);

    store.add_edge(&id("A"), &id("B"), 1).unwrap();
    assert_eq!(store.revision(), start + 1);

    store.clear();
    assert_eq!(store.revision(), start + 2);
}

#[test]
fn test_stats() {
    let mut store = store_with(&["A", "B", "C"]);
    store.add_edge(&id("A"), &id("B"), 1).unwrap();
    store.add_edge(&id("B"), &id("C"), 1).unwrap();

    let stats = store.view().stats();
    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.edge_count, 2);
}
