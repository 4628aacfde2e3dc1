// In-memory weighted undirected graph with node positions

use crate::error::{GraphError, Result};
use crate::model::{CanvasBounds, Cost, Edge, GraphStats, MAX_COST, NodeId, Position};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeEntry {
    id: NodeId,
    position: Position,
}

/// Read-only graph contents.
///
/// Nodes are kept in insertion order and addressed internally by that
/// order. Each node owns a map from neighbour index to edge cost, so an
/// unordered pair can only ever hold one edge and both directions agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphView {
    nodes: Vec<NodeEntry>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<BTreeMap<usize, Cost>>,
}

impl GraphView {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum::<usize>() / 2
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn position(&self, id: &NodeId) -> Option<Position> {
        self.index.get(id).map(|&i| self.nodes[i].position)
    }

    /// Nodes with their positions, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, Position)> + '_ {
        self.nodes.iter().map(|n| (&n.id, n.position))
    }

    /// Every edge once, ordered by the earlier-inserted endpoint.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (i, neighbours) in self.adjacency.iter().enumerate() {
            for (&j, &cost) in neighbours.range(i + 1..) {
                edges.push(Edge {
                    a: self.nodes[i].id.clone(),
                    b: self.nodes[j].id.clone(),
                    cost,
                });
            }
        }
        edges
    }

    pub fn neighbors(&self, id: &NodeId) -> Option<Vec<(NodeId, Cost)>> {
        let i = *self.index.get(id)?;
        Some(
            self.adjacency[i]
                .iter()
                .map(|(&j, &cost)| (self.nodes[j].id.clone(), cost))
                .collect(),
        )
    }

    pub fn weight(&self, a: &NodeId, b: &NodeId) -> Option<Cost> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        self.adjacency[i].get(&j).copied()
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn id_at(&self, index: usize) -> &NodeId {
        &self.nodes[index].id
    }

    pub(crate) fn edge_cost(&self, i: usize, j: usize) -> Option<Cost> {
        self.adjacency[i].get(&j).copied()
    }

    pub(crate) fn adjacent(&self, index: usize) -> impl Iterator<Item = (usize, Cost)> + '_ {
        self.adjacency[index].iter().map(|(&j, &cost)| (j, cost))
    }

    fn insert_node(&mut self, id: NodeId, position: Position) {
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(NodeEntry { id, position });
        self.adjacency.push(BTreeMap::new());
    }

    fn upsert_edge(&mut self, i: usize, j: usize, cost: Cost) -> Option<Cost> {
        self.adjacency[j].insert(i, cost);
        self.adjacency[i].insert(j, cost)
    }
}

/// The single mutable owner of a session's graph.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    graph: GraphView,
    bounds: CanvasBounds,
    revision: u64,
}

impl GraphStore {
    pub fn new(bounds: CanvasBounds) -> Self {
        Self {
            graph: GraphView::default(),
            bounds,
            revision: 0,
        }
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn view(&self) -> &GraphView {
        &self.graph
    }

    /// An owned copy that later mutations cannot reach.
    pub fn snapshot_view(&self) -> GraphView {
        self.graph.clone()
    }

    pub fn next_node_id(&self) -> NodeId {
        NodeId::numbered(self.graph.node_count() + 1)
    }

    pub fn add_node(&mut self, id: NodeId, position: Position) -> Result<()> {
        if self.graph.contains(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.bounds.check(position)?;

        debug!("Adding {} at {}", id, position);
        self.graph.insert_node(id, position);
        self.revision += 1;
        Ok(())
    }

    /// Inserts the edge `{a, b}` or overwrites its cost.
    ///
    /// Costs outside `1..=MAX_COST` are rejected with `InvalidWeight`.
    pub fn add_edge(&mut self, a: &NodeId, b: &NodeId, weight: Cost) -> Result<()> {
        let i = self
            .graph
            .index_of(a)
            .ok_or_else(|| GraphError::UnknownNode(a.clone()))?;
        let j = self
            .graph
            .index_of(b)
            .ok_or_else(|| GraphError::UnknownNode(b.clone()))?;
        if i == j {
            return Err(GraphError::SelfLoop(a.clone()));
        }
        if !(1..=MAX_COST).contains(&weight) {
            return Err(GraphError::InvalidWeight(weight));
        }

        match self.graph.upsert_edge(i, j, weight) {
            Some(old) => debug!("Edge {} <-> {} cost {} -> {}", a, b, old, weight),
            None => debug!("Edge {} <-> {} cost {}", a, b, weight),
        }
        self.revision += 1;
        Ok(())
    }

    pub fn clear(&mut self) {
        info!(
            "Clearing graph ({} nodes, {} edges)",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        self.graph = GraphView::default();
        self.revision += 1;
    }

    /// Rebuilds the graph from plain node and edge lists.
    ///
    /// The lists are validated against an empty graph first, so a bad list
    /// leaves the current contents untouched.
    pub fn replace_with(&mut self, nodes: &[(NodeId, Position)], edges: &[Edge]) -> Result<()> {
        let mut fresh = GraphStore::new(self.bounds);
        for (id, position) in nodes {
            fresh.add_node(id.clone(), *position)?;
        }
        for edge in edges {
            fresh.add_edge(&edge.a, &edge.b, edge.cost)?;
        }

        self.graph = fresh.graph;
        self.revision += 1;
        Ok(())
    }
}
