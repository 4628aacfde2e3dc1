// Line-oriented command language shared by the shell and the TUI

use crate::canvas::render_canvas;
use crate::error::GraphError;
use crate::model::{Cost, NodeId, Position};
use crate::path::PathResult;
use crate::session::Session;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("Please enter a graph name")]
    EmptySnapshotName,

    #[error("Unterminated quote in: {0}")]
    UnterminatedQuote(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddNode(Position),
    AddEdge { from: NodeId, to: NodeId, cost: Cost },
    Path { from: NodeId, to: NodeId },
    Trace { from: NodeId, to: NodeId },
    Save(String),
    Load(String),
    Delete(String),
    List,
    Stats,
    Show,
    Nodes,
    Edges,
    Reset,
    Help,
}

pub const HELP: &[&str] = &[
    "Available commands:",
    "  node add <x> <y>               - Place a node on the canvas",
    "  edge add <from> <to> <cost>    - Connect two nodes (re-adding updates the cost)",
    "  path <from> <to>               - Find the shortest path",
    "  trace <from> <to>              - Show every step of Dijkstra's algorithm",
    "  show                           - Draw the canvas with the current path",
    "  nodes | edges | stats          - Inspect the graph",
    "  save <name>                    - Save the graph under a name",
    "  load <name>                    - Replace the graph with a saved one",
    "  delete <name>                  - Forget a saved graph",
    "  list                           - List saved graphs",
    "  reset                          - Remove all nodes and edges",
    "  help                           - Show this help message",
    "",
    "Nodes can be written as \"Node 3\" or just 3.",
];

/// Splits a line on whitespace, keeping double-quoted runs together.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote(line.to_string()));
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    Ok(tokens)
}

/// `3` is shorthand for `Node 3`; anything else is taken literally.
pub fn parse_node(token: &str) -> NodeId {
    match token.parse::<usize>() {
        Ok(n) => NodeId::numbered(n),
        Err(_) => NodeId::new(token),
    }
}

fn parse_number<T: std::str::FromStr>(token: &str) -> Result<T, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

fn snapshot_name(tokens: &[String], usage: &'static str) -> Result<String, CommandError> {
    if tokens.len() > 2 {
        return Err(CommandError::Usage(usage));
    }
    match tokens.get(1).map(|s| s.trim()) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(CommandError::EmptySnapshotName),
    }
}

/// Parses one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens = tokenize(line)?;
    let Some(head) = tokens.first() else {
        return Ok(None);
    };
    let args = &tokens[1..];

    let command = match head.as_str() {
        "node" => match args {
            [sub, x, y] if sub == "add" => {
                Command::AddNode(Position::new(parse_number(x)?, parse_number(y)?))
            }
            _ => return Err(CommandError::Usage("node add <x> <y>")),
        },
        "edge" => match args {
            [sub, from, to, cost] if sub == "add" => Command::AddEdge {
                from: parse_node(from),
                to: parse_node(to),
                cost: parse_number(cost)?,
            },
            _ => return Err(CommandError::Usage("edge add <from> <to> <cost>")),
        },
        "path" => match args {
            [from, to] => Command::Path {
                from: parse_node(from),
                to: parse_node(to),
            },
            _ => return Err(CommandError::Usage("path <from> <to>")),
        },
        "trace" => match args {
            [from, to] => Command::Trace {
                from: parse_node(from),
                to: parse_node(to),
            },
            _ => return Err(CommandError::Usage("trace <from> <to>")),
        },
        "save" => Command::Save(snapshot_name(&tokens, "save <name>")?),
        "load" => Command::Load(snapshot_name(&tokens, "load <name>")?),
        "delete" => Command::Delete(snapshot_name(&tokens, "delete <name>")?),
        "list" => Command::List,
        "stats" => Command::Stats,
        "show" => Command::Show,
        "nodes" => Command::Nodes,
        "edges" => Command::Edges,
        "reset" => Command::Reset,
        "help" => Command::Help,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Parses and runs one line against `session`, returning the lines to show.
pub fn execute(session: &mut Session, line: &str) -> Result<Vec<String>, CommandError> {
    match parse_command(line)? {
        Some(command) => run(session, command),
        None => Ok(Vec::new()),
    }
}

pub fn run(session: &mut Session, command: Command) -> Result<Vec<String>, CommandError> {
    let output = match command {
        Command::AddNode(position) => {
            let id = session.add_node(position)?;
            vec![format!("✓ {} added at {}", id, position)]
        }
        Command::AddEdge { from, to, cost } => {
            session.add_edge(&from, &to, cost)?;
            vec![format!("✓ Edge added: {} ↔ {} (cost: {})", from, to, cost)]
        }
        Command::Path { from, to } => match session.find_path(&from, &to)? {
            PathResult::Found(path) => vec![
                format!("✓ Shortest path: {}", path),
                format!("  Total cost: {}", path.cost),
            ],
            PathResult::NoPath => vec!["✗ No path exists between selected nodes!".to_string()],
        },
        Command::Trace { from, to } => {
            let trace = session.trace_path(&from, &to)?;
            let mut lines: Vec<String> = trace
                .steps
                .iter()
                .enumerate()
                .map(|(idx, step)| format!("{:>3}. {}", idx + 1, step))
                .collect();
            lines.push(match &trace.result {
                PathResult::Found(path) => format!("  Result: {} (cost: {})", path, path.cost),
                PathResult::NoPath => "  Result: no path".to_string(),
            });
            lines
        }
        Command::Save(name) => {
            session.save_snapshot(&name);
            vec![format!("✓ Graph '{}' saved successfully!", name)]
        }
        Command::Load(name) => {
            session.load_snapshot(&name)?;
            vec![format!("✓ Graph '{}' loaded successfully!", name)]
        }
        Command::Delete(name) => {
            session.delete_snapshot(&name)?;
            vec![format!("✓ Graph '{}' deleted", name)]
        }
        Command::List => {
            let saved = session.describe_snapshots();
            if saved.is_empty() {
                vec!["No saved graphs available".to_string()]
            } else {
                saved
                    .into_iter()
                    .map(|info| {
                        format!(
                            "  {}  ({} nodes, {} edges, saved {})",
                            info.name,
                            info.stats.node_count,
                            info.stats.edge_count,
                            info.saved_at.format("%H:%M:%S")
                        )
                    })
                    .collect()
            }
        }
        Command::Stats => {
            let stats = session.stats();
            vec![
                "Graph Statistics".to_string(),
                format!("  Nodes: {}", stats.node_count),
                format!("  Edges: {}", stats.edge_count),
            ]
        }
        Command::Show => {
            let highlight = session.highlight();
            render_canvas(
                session.graph(),
                session.bounds(),
                highlight.as_ref().and_then(PathResult::path),
            )
        }
        Command::Nodes => {
            let lines: Vec<String> = session
                .graph()
                .nodes()
                .map(|(id, position)| format!("  {} {}", id, position))
                .collect();
            if lines.is_empty() {
                vec!["No nodes yet. Try: node add <x> <y>".to_string()]
            } else {
                lines
            }
        }
        Command::Edges => {
            let lines: Vec<String> = session
                .graph()
                .edges()
                .into_iter()
                .map(|e| format!("  {} ↔ {} (cost: {})", e.a, e.b, e.cost))
                .collect();
            if lines.is_empty() {
                vec!["No edges yet. Add at least two nodes to create edges.".to_string()]
            } else {
                lines
            }
        }
        Command::Reset => {
            session.clear();
            vec!["✓ Graph cleared".to_string()]
        }
        Command::Help => HELP.iter().map(|s| s.to_string()).collect(),
    };
    Ok(output)
}
