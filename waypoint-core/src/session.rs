// One user's graph, snapshots and active path query

use crate::archive::{Snapshot, SnapshotArchive, SnapshotInfo};
use crate::error::Result;
use crate::graph::{GraphStore, GraphView};
use crate::model::{CanvasBounds, Cost, GraphStats, NodeId, Position};
use crate::path::{self, PathResult, PathTrace};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub bounds: CanvasBounds,
}

impl SessionConfig {
    pub fn with_bounds(mut self, bounds: CanvasBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

#[derive(Debug, Clone)]
struct Highlight {
    source: NodeId,
    target: NodeId,
    revision: u64,
    result: PathResult,
}

/// Everything a presentation layer needs for a single user.
///
/// Sessions share nothing with each other; a multi-user front end keeps one
/// per user and serializes calls into it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    store: GraphStore,
    archive: SnapshotArchive,
    highlight: Option<Highlight>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: GraphStore::new(config.bounds),
            archive: SnapshotArchive::new(),
            highlight: None,
        }
    }

    pub fn graph(&self) -> &GraphView {
        self.store.view()
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.store.bounds()
    }

    /// Adds a node named after the current count, e.g. `Node 4` for the fourth.
    pub fn add_node(&mut self, position: Position) -> Result<NodeId> {
        let id = self.store.next_node_id();
        self.store.add_node(id.clone(), position)?;
        info!("{} added at {}", id, position);
        Ok(id)
    }

    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId, weight: Cost) -> Result<()> {
        self.store.add_edge(from, to, weight)?;
        info!("Edge added: {} <-> {} (cost: {})", from, to, weight);
        Ok(())
    }

    /// Computes the path and makes it the active highlight.
    pub fn find_path(&mut self, from: &NodeId, to: &NodeId) -> Result<PathResult> {
        let result = path::find_path(self.store.view(), from, to)?;
        self.highlight = Some(Highlight {
            source: from.clone(),
            target: to.clone(),
            revision: self.store.revision(),
            result: result.clone(),
        });
        Ok(result)
    }

    pub fn trace_path(&self, from: &NodeId, to: &NodeId) -> Result<PathTrace> {
        path::trace_path(self.store.view(), from, to)
    }

    /// The active query's result against the current graph.
    ///
    /// Recomputed only when the graph changed since the last computation.
    pub fn highlight(&mut self) -> Option<PathResult> {
        let revision = self.store.revision();
        let view = self.store.view();
        let current = self.highlight.as_mut()?;
        if current.revision != revision {
            debug!(
                "Refreshing highlight {} -> {} at revision {}",
                current.source, current.target, revision
            );
            current.result = path::find_path(view, &current.source, &current.target).ok()?;
            current.revision = revision;
        }
        Some(current.result.clone())
    }

    pub fn highlight_query(&self) -> Option<(&NodeId, &NodeId)> {
        self.highlight.as_ref().map(|h| (&h.source, &h.target))
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn save_snapshot(&mut self, name: &str) {
        self.archive.save(name, Snapshot::capture(self.store.view()));
    }

    /// Replaces the graph with a copy of the named snapshot.
    pub fn load_snapshot(&mut self, name: &str) -> Result<()> {
        let snapshot = self.archive.load(name)?;
        self.store.replace_with(&snapshot.nodes, &snapshot.edges)?;
        self.drop_stale_highlight();
        info!("Graph '{}' loaded", name);
        Ok(())
    }

    pub fn delete_snapshot(&mut self, name: &str) -> Result<()> {
        self.archive.delete(name)
    }

    pub fn list_snapshots(&self) -> Vec<String> {
        self.archive.list()
    }

    pub fn describe_snapshots(&self) -> Vec<SnapshotInfo> {
        self.archive.describe()
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.clear_highlight();
    }

    pub fn stats(&self) -> GraphStats {
        self.store.view().stats()
    }

    fn drop_stale_highlight(&mut self) {
        let view = self.store.view();
        if let Some(h) = &self.highlight {
            if !view.contains(&h.source) || !view.contains(&h.target) {
                debug!("Dropping highlight {} -> {}", h.source, h.target);
                self.highlight = None;
            }
        }
    }
}
