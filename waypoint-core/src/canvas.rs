// Text rendering of the node canvas

use crate::graph::GraphView;
use crate::model::{CanvasBounds, Position};
use crate::path::Path;
use std::collections::HashMap;

const CELL: usize = 4;

/// Draws the canvas with a one-cell margin around `bounds`.
///
/// Nodes are labelled with their 1-based insertion number. Nodes on the
/// highlighted path get a `*`, cells holding several nodes show `+`. A
/// legend with positions, edges and the highlighted route follows the grid.
pub fn render_canvas(
    view: &GraphView,
    bounds: CanvasBounds,
    highlight: Option<&Path>,
) -> Vec<String> {
    let mut cells: HashMap<Position, Vec<(usize, bool)>> = HashMap::new();
    for (idx, (id, position)) in view.nodes().enumerate() {
        let on_path = highlight.is_some_and(|p| p.contains(id));
        cells.entry(position).or_default().push((idx + 1, on_path));
    }

    let low = bounds.min - 1;
    let high = bounds.max + 1;
    let mut lines = Vec::new();

    for y in (low..=high).rev() {
        let mut row = format!("{:>3} │", y);
        for x in low..=high {
            let cell = match cells.get(&Position::new(x, y)) {
                None if x % 5 == 0 && y % 5 == 0 => "·".to_string(),
                None => String::new(),
                Some(occupants) if occupants.len() > 1 => {
                    let marked = occupants.iter().any(|(_, on_path)| *on_path);
                    if marked { "*+".to_string() } else { "+".to_string() }
                }
                Some(occupants) => {
                    let (label, on_path) = occupants[0];
                    if on_path { format!("*{}", label) } else { label.to_string() }
                }
            };
            row.push_str(&format!("{:^width$}", cell, width = CELL));
        }
        lines.push(row.trim_end().to_string());
    }

    let span = (high - low + 1) as usize;
    lines.push(format!("    └{}", "─".repeat(span * CELL)));
    let mut axis = String::from("     ");
    for x in low..=high {
        axis.push_str(&format!("{:^width$}", x, width = CELL));
    }
    lines.push(axis.trim_end().to_string());

    if view.is_empty() {
        lines.push(String::new());
        lines.push("  (no nodes yet)".to_string());
        return lines;
    }

    lines.push(String::new());
    lines.push("Nodes:".to_string());
    for (idx, (id, position)) in view.nodes().enumerate() {
        lines.push(format!("  {:>2}  {} {}", idx + 1, id, position));
    }

    let edges = view.edges();
    if !edges.is_empty() {
        lines.push("Edges:".to_string());
        for edge in &edges {
            let on_path = highlight.is_some_and(|p| {
                p.edges().iter().any(|(a, b)| {
                    (*a == &edge.a && *b == &edge.b) || (*a == &edge.b && *b == &edge.a)
                })
            });
            let marker = if on_path { "*" } else { " " };
            lines.push(format!(" {} {} ↔ {} (cost: {})", marker, edge.a, edge.b, edge.cost));
        }
    }

    if let Some(path) = highlight {
        lines.push(format!("Path:  {}  (cost: {})", path, path.cost));
        if let Some((from, to)) = path.final_edge() {
            lines.push(format!("Last hop: {} → {}", from, to));
        }
    }

    lines
}
