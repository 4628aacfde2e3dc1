use crate::model::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node already exists: {0}")]
    DuplicateNode(NodeId),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Self-loop on {0}: an edge needs two different nodes")]
    SelfLoop(NodeId),

    #[error("Invalid edge cost {0}: cost must be between 1 and 4294967295")]
    InvalidWeight(i64),

    #[error("Position ({x}, {y}) is outside the canvas [{min}, {max}]")]
    PositionOutOfBounds { x: i32, y: i32, min: i32, max: i32 },

    #[error("Graph '{0}' does not exist")]
    UnknownSnapshot(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
