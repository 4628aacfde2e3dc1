use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge cost. Stored costs lie in `1..=MAX_COST`.
pub type Cost = i64;

/// Largest accepted edge cost.
///
/// Any simple path has fewer than `u32::MAX` edges, so summing costs along a
/// path can never overflow a `Cost`.
pub const MAX_COST: Cost = u32::MAX as Cost;

/// Opaque node identifier, e.g. `"Node 3"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier handed out for the `n`-th node (1-based).
    pub fn numbered(n: usize) -> Self {
        Self(format!("Node {}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Closed coordinate range shared by both canvas axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self { min: 0, max: 10 }
    }
}

impl CanvasBounds {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, position: Position) -> bool {
        (self.min..=self.max).contains(&position.x) && (self.min..=self.max).contains(&position.y)
    }

    pub fn check(&self, position: Position) -> Result<()> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(GraphError::PositionOutOfBounds {
                x: position.x,
                y: position.y,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub cost: Cost,
}
