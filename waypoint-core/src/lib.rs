pub mod archive;
pub mod canvas;
pub mod console;
pub mod error;
pub mod graph;
pub mod model;
pub mod path;
pub mod report;
pub mod session;

pub use archive::{Snapshot, SnapshotArchive, SnapshotInfo};
pub use error::{GraphError, Result};
pub use graph::{GraphStore, GraphView};
pub use model::{CanvasBounds, Cost, Edge, GraphStats, MAX_COST, NodeId, Position};
pub use path::{Path, PathResult, PathTrace, TraceStep, find_path, trace_path};
pub use session::{Session, SessionConfig};

pub const BANNER: &str = r#"
 ██╗    ██╗ █████╗ ██╗   ██╗██████╗  ██████╗ ██╗███╗   ██╗████████╗
 ██║    ██║██╔══██╗╚██╗ ██╔╝██╔══██╗██╔═══██╗██║████╗  ██║╚══██╔══╝
 ██║ █╗ ██║███████║ ╚████╔╝ ██████╔╝██║   ██║██║██╔██╗ ██║   ██║
 ██║███╗██║██╔══██║  ╚██╔╝  ██╔═══╝ ██║   ██║██║██║╚██╗██║   ██║
 ╚███╔███╔╝██║  ██║   ██║   ██║     ╚██████╔╝██║██║ ╚████║   ██║
  ╚══╝╚══╝ ╚═╝  ╚═╝   ╚═╝   ╚═╝      ╚═════╝ ╚═╝╚═╝  ╚═══╝   ╚═╝
          Dijkstra's Algorithm, one node at a time
"#;

pub fn print_banner() {
    println!("{}", BANNER);
}
