pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{demo_session, path_report, run_script, run_shell, style_line};

// Re-export the core so callers only need one dependency
pub use waypoint_core::{PathResult, Session, SessionConfig};
