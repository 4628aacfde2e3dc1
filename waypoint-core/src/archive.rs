// Named, immutable copies of a graph

use crate::error::{GraphError, Result};
use crate::graph::GraphView;
use crate::model::{Edge, GraphStats, NodeId, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<(NodeId, Position)>,
    pub edges: Vec<Edge>,
    pub saved_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn capture(view: &GraphView) -> Self {
        Self {
            nodes: view.nodes().map(|(id, pos)| (id.clone(), pos)).collect(),
            edges: view.edges(),
            saved_at: Utc::now(),
        }
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
        }
    }

    /// True when the snapshot holds exactly the contents of `view`.
    pub fn matches(&self, view: &GraphView) -> bool {
        self.nodes.len() == view.node_count()
            && self
                .nodes
                .iter()
                .zip(view.nodes())
                .all(|((id, pos), (vid, vpos))| id == vid && *pos == vpos)
            && self.edges == view.edges()
    }
}

/// Listing row for a saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub name: String,
    pub stats: GraphStats,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotArchive {
    entries: BTreeMap<String, Snapshot>,
}

impl SnapshotArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `snapshot` under `name`, replacing any earlier entry.
    pub fn save(&mut self, name: impl Into<String>, snapshot: Snapshot) {
        let name = name.into();
        let stats = snapshot.stats();
        if self.entries.insert(name.clone(), snapshot).is_some() {
            info!(
                "Overwrote graph '{}' ({} nodes, {} edges)",
                name, stats.node_count, stats.edge_count
            );
        } else {
            info!(
                "Saved graph '{}' ({} nodes, {} edges)",
                name, stats.node_count, stats.edge_count
            );
        }
    }

    pub fn load(&self, name: &str) -> Result<Snapshot> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| GraphError::UnknownSnapshot(name.to_string()))
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.entries
            .remove(name)
            .map(|_| info!("Deleted graph '{}'", name))
            .ok_or_else(|| GraphError::UnknownSnapshot(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn list(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn describe(&self) -> Vec<SnapshotInfo> {
        self.entries
            .iter()
            .map(|(name, snapshot)| SnapshotInfo {
                name: name.clone(),
                stats: snapshot.stats(),
                saved_at: snapshot.saved_at,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
