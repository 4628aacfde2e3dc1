// Shortest-path engine (Dijkstra over a GraphView)

use crate::error::{GraphError, Result};
use crate::graph::GraphView;
use crate::model::{Cost, NodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use tracing::debug;

/// A route from source to target, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub cost: Cost,
}

impl Path {
    pub fn source(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn target(&self) -> Option<&NodeId> {
        self.nodes.last()
    }

    /// Number of edges walked.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Consecutive node pairs along the path.
    pub fn edges(&self) -> Vec<(&NodeId, &NodeId)> {
        self.nodes.windows(2).map(|w| (&w[0], &w[1])).collect()
    }

    /// The last hop into the target, if the path has one.
    pub fn final_edge(&self) -> Option<(&NodeId, &NodeId)> {
        self.edges().pop()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route: Vec<&str> = self.nodes.iter().map(NodeId::as_str).collect();
        write!(f, "{}", route.join(" → "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathResult {
    Found(Path),
    /// Source and target lie in different components.
    NoPath,
}

impl PathResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NoPath => None,
        }
    }

    pub fn cost(&self) -> Option<Cost> {
        self.path().map(|p| p.cost)
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
}

/// One step of the algorithm, as shown to a learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TraceStep {
    /// Every distance starts at infinity except the source, which is 0.
    Initialize { source: NodeId },
    /// The unvisited node with the smallest distance is settled.
    Visit { node: NodeId, distance: Cost },
    /// A neighbour's tentative distance improved.
    Relax {
        from: NodeId,
        to: NodeId,
        old: Option<Cost>,
        new: Cost,
    },
    Finish,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceStep::Initialize { source } => {
                write!(f, "Initialize distances: {} = 0, all others = ∞", source)
            }
            TraceStep::Visit { node, distance } => {
                write!(f, "Select minimum: {} (distance {})", node, distance)
            }
            TraceStep::Relax { from, to, old, new } => {
                let old = old.map_or_else(|| "∞".to_string(), |c| c.to_string());
                write!(f, "Update neighbour {} via {}: {} → {}", to, from, old, new)
            }
            TraceStep::Finish => write!(f, "Done"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTrace {
    pub steps: Vec<TraceStep>,
    pub result: PathResult,
}

enum Event {
    Visit { node: usize, distance: Cost },
    Relax { from: usize, to: usize, old: Option<Cost>, new: Cost },
}

struct Search {
    dist: Vec<Option<Cost>>,
    prev: Vec<Option<usize>>,
}

/// Shortest path from `source` to `target`.
///
/// Among nodes at equal tentative distance the one added to the graph first
/// is settled first, so equal-cost alternatives always resolve the same way.
pub fn find_path(view: &GraphView, source: &NodeId, target: &NodeId) -> Result<PathResult> {
    let (s, t) = endpoints(view, source, target)?;
    let search = dijkstra(view, s, t, |_| {});
    let result = build_result(view, &search, s, t);
    debug!(
        "Path {} -> {}: {}",
        source,
        target,
        result
            .path()
            .map_or_else(|| "none".to_string(), |p| format!("cost {}", p.cost))
    );
    Ok(result)
}

/// Same search as [`find_path`], recording every step on the way.
pub fn trace_path(view: &GraphView, source: &NodeId, target: &NodeId) -> Result<PathTrace> {
    let (s, t) = endpoints(view, source, target)?;

    let mut steps = vec![TraceStep::Initialize {
        source: source.clone(),
    }];
    let search = dijkstra(view, s, t, |event| {
        steps.push(match event {
            Event::Visit { node, distance } => TraceStep::Visit {
                node: view.id_at(node).clone(),
                distance,
            },
            Event::Relax { from, to, old, new } => TraceStep::Relax {
                from: view.id_at(from).clone(),
                to: view.id_at(to).clone(),
                old,
                new,
            },
        })
    });
    steps.push(TraceStep::Finish);

    Ok(PathTrace {
        steps,
        result: build_result(view, &search, s, t),
    })
}

fn endpoints(view: &GraphView, source: &NodeId, target: &NodeId) -> Result<(usize, usize)> {
    let s = view
        .index_of(source)
        .ok_or_else(|| GraphError::UnknownNode(source.clone()))?;
    let t = view
        .index_of(target)
        .ok_or_else(|| GraphError::UnknownNode(target.clone()))?;
    Ok((s, t))
}

fn dijkstra<F: FnMut(Event)>(
    view: &GraphView,
    source: usize,
    target: usize,
    mut observe: F,
) -> Search {
    let n = view.node_count();
    let mut dist: Vec<Option<Cost>> = vec![None; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];

    // Min-heap on (distance, insertion index); stale entries are skipped on pop.
    let mut frontier = BinaryHeap::new();
    dist[source] = Some(0);
    frontier.push(Reverse((0, source)));

    while let Some(Reverse((distance, node))) = frontier.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        observe(Event::Visit { node, distance });

        if node == target {
            break;
        }

        for (next, cost) in view.adjacent(node) {
            if visited[next] {
                continue;
            }
            // Costs are bounded by MAX_COST, so this cannot overflow
            let candidate = distance + cost;
            if dist[next].is_none_or(|current| candidate < current) {
                observe(Event::Relax {
                    from: node,
                    to: next,
                    old: dist[next],
                    new: candidate,
                });
                dist[next] = Some(candidate);
                prev[next] = Some(node);
                frontier.push(Reverse((candidate, next)));
            }
        }
    }

    Search { dist, prev }
}

fn build_result(view: &GraphView, search: &Search, source: usize, target: usize) -> PathResult {
    let Some(distance) = search.dist[target] else {
        return PathResult::NoPath;
    };

    let mut indices = vec![target];
    let mut cursor = target;
    while cursor != source {
        // Every reached node other than the source has a predecessor.
        match search.prev[cursor] {
            Some(p) => {
                indices.push(p);
                cursor = p;
            }
            None => return PathResult::NoPath,
        }
    }
    indices.reverse();

    let cost: Cost = indices
        .windows(2)
        .filter_map(|w| view.edge_cost(w[0], w[1]))
        .sum();
    debug_assert_eq!(cost, distance, "path cost must equal the settled distance");

    PathResult::Found(Path {
        nodes: indices.into_iter().map(|i| view.id_at(i).clone()).collect(),
        cost,
    })
}
