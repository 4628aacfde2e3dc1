// Tests for the per-user session facade

use waypoint_core::{
    CanvasBounds, GraphError, NodeId, PathResult, Position, Session, SessionConfig,
};

fn node(n: usize) -> NodeId {
    NodeId::numbered(n)
}

/// Node 1 (0,0), Node 2 (1,1), Node 3 (2,2) with 1-2 = 2, 2-3 = 3, 1-3 = 10.
fn triangle() -> Session {
    let mut session = Session::default();
    session.add_node(Position::new(0, 0)).unwrap();
    session.add_node(Position::new(1, 1)).unwrap();
    session.add_node(Position::new(2, 2)).unwrap();
    session.add_edge(&node(1), &node(2), 2).unwrap();
    session.add_edge(&node(2), &node(3), 3).unwrap();
    session.add_edge(&node(1), &node(3), 10).unwrap();
    session
}

// ============================================================================
// Graph Operation Tests
// ============================================================================

#[test]
fn test_add_node_generates_ids() {
    let mut session = Session::default();
    assert_eq!(session.add_node(Position::new(0, 0)).unwrap(), node(1));
    assert_eq!(session.add_node(Position::new(5, 5)).unwrap(), node(2));
    assert_eq!(session.graph().position(&node(2)), Some(Position::new(5, 5)));
}

#[test]
fn test_add_node_respects_configured_bounds() {
    let config = SessionConfig::default().with_bounds(CanvasBounds::new(0, 3));
    let mut session = Session::new(config);

    assert!(session.add_node(Position::new(3, 3)).is_ok());
    assert!(matches!(
        session.add_node(Position::new(4, 0)),
        Err(GraphError::PositionOutOfBounds { .. })
    ));
    assert_eq!(session.stats().node_count, 1);
}

#[test]
fn test_stats() {
    let session = triangle();
    let stats = session.stats();
    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.edge_count, 3);
}

#[test]
fn test_find_path() {
    let mut session = triangle();
    let result = session.find_path(&node(1), &node(3)).unwrap();

    assert_eq!(result.path().unwrap().nodes, vec![node(1), node(2), node(3)]);
    assert_eq!(result.cost(), Some(5));
}

#[test]
fn test_clear() {
    let mut session = triangle();
    session.clear();

    assert_eq!(session.stats().node_count, 0);
    assert_eq!(session.stats().edge_count, 0);
    assert_eq!(session.add_node(Position::new(0, 0)).unwrap(), node(1));
}

// ============================================================================
// Snapshot Tests
// ============================================================================

#[test]
fn test_save_clear_load_restores_graph() {
    let mut session = triangle();
    let before = session.graph().clone();

    session.save_snapshot("triangle");
    session.clear();
    session.load_snapshot("triangle").unwrap();

    assert_eq!(session.graph(), &before);
}

#[test]
fn test_load_replaces_current_graph() {
    let mut session = triangle();
    session.save_snapshot("triangle");

    session.clear();
    session.add_node(Position::new(9, 9)).unwrap();
    session.load_snapshot("triangle").unwrap();

    assert_eq!(session.stats().node_count, 3);
    assert_eq!(session.graph().position(&node(1)), Some(Position::new(0, 0)));
}

#[test]
fn test_load_unknown_leaves_graph_unchanged() {
    let mut session = triangle();
    let before = session.graph().clone();

    assert_eq!(
        session.load_snapshot("nope"),
        Err(GraphError::UnknownSnapshot("nope".to_string()))
    );
    assert_eq!(session.graph(), &before);
}

#[test]
fn test_list_and_delete_snapshots() {
    let mut session = triangle();
    session.save_snapshot("b");
    session.save_snapshot("a");
    assert_eq!(session.list_snapshots(), vec!["a", "b"]);

    session.delete_snapshot("a").unwrap();
    assert_eq!(session.list_snapshots(), vec!["b"]);
    assert!(session.delete_snapshot("a").is_err());
}

#[test]
fn test_snapshots_survive_clear() {
    let mut session = triangle();
    session.save_snapshot("keep");
    session.clear();
    assert_eq!(session.list_snapshots(), vec!["keep"]);
}

// ============================================================================
// Highlight Tests
// ============================================================================

#[test]
fn test_no_highlight_before_query() {
    let mut session = triangle();
    assert_eq!(session.highlight(), None);
    assert_eq!(session.highlight_query(), None);
}

#[test]
fn test_highlight_follows_graph_edits() {
    let mut session = triangle();
    session.find_path(&node(1), &node(3)).unwrap();
    assert_eq!(session.highlight().unwrap().cost(), Some(5));

    // A cheaper direct edge takes over
    session.add_edge(&node(1), &node(3), 1).unwrap();
    let refreshed = session.highlight().unwrap();
    assert_eq!(refreshed.cost(), Some(1));
    assert_eq!(refreshed.path().unwrap().nodes, vec![node(1), node(3)]);
}

#[test]
fn test_highlight_becomes_no_path() {
    let mut session = Session::default();
    session.add_node(Position::new(0, 0)).unwrap();
    session.add_node(Position::new(1, 0)).unwrap();
    assert_eq!(session.find_path(&node(1), &node(2)).unwrap(), PathResult::NoPath);

    session.add_edge(&node(1), &node(2), 4).unwrap();
    assert_eq!(session.highlight().unwrap().cost(), Some(4));
}

#[test]
fn test_clear_drops_highlight() {
    let mut session = triangle();
    session.find_path(&node(1), &node(3)).unwrap();
    session.clear();
    assert_eq!(session.highlight(), None);
}

#[test]
fn test_clear_highlight_keeps_graph() {
    let mut session = triangle();
    session.find_path(&node(1), &node(3)).unwrap();

    session.clear_highlight();
    assert_eq!(session.highlight_query(), None);
    assert_eq!(session.highlight(), None);
    assert_eq!(session.stats().edge_count, 3);
}

#[test]
fn test_load_keeps_highlight_when_endpoints_exist() {
    let mut session = triangle();
    session.save_snapshot("t");
    session.find_path(&node(1), &node(3)).unwrap();

    session.add_edge(&node(1), &node(3), 1).unwrap();
    session.load_snapshot("t").unwrap();

    assert_eq!(session.highlight().unwrap().cost(), Some(5));
}

#[test]
fn test_load_drops_highlight_for_missing_endpoint() {
    let mut session = Session::default();
    session.add_node(Position::new(0, 0)).unwrap();
    session.save_snapshot("one");

    session.add_node(Position::new(1, 1)).unwrap();
    session.add_edge(&node(1), &node(2), 1).unwrap();
    session.find_path(&node(1), &node(2)).unwrap();

    session.load_snapshot("one").unwrap();
    assert_eq!(session.highlight(), None);
}

#[test]
fn test_failed_query_keeps_previous_highlight() {
    let mut session = triangle();
    session.find_path(&node(1), &node(3)).unwrap();
    assert!(session.find_path(&node(1), &node(9)).is_err());
    assert_eq!(session.highlight_query(), Some((&node(1), &node(3))));
}
