// Path report rendering

use crate::model::{GraphStats, NodeId};
use crate::path::{PathResult, TraceStep};
use serde::{Deserialize, Serialize};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub source: NodeId,
    pub target: NodeId,
    pub result: PathResult,
    pub stats: GraphStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<TraceStep>>,
}

pub fn render_report(data: &ReportData, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(data)),
        ReportFormat::Json => generate_json_report(data),
        ReportFormat::Markdown => Ok(generate_markdown_report(data)),
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("\n              DIJKSTRA SHORTEST PATH\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!("From:         {}\n", data.source));
    report.push_str(&format!("To:           {}\n", data.target));
    report.push_str(&format!(
        "Graph:        {} nodes, {} edges\n\n",
        data.stats.node_count, data.stats.edge_count
    ));

    match &data.result {
        PathResult::Found(path) => {
            report.push_str(&format!("Shortest path: {}\n", path));
            report.push_str(&format!("Total cost:    {}\n", path.cost));
            report.push_str(&format!("Hops:          {}\n", path.hops()));
        }
        PathResult::NoPath => {
            report.push_str("No path exists between selected nodes!\n");
        }
    }

    if let Some(steps) = &data.steps {
        report.push('\n');
        report.push_str(RULE);
        report.push_str("\nALGORITHM STEPS\n");
        report.push_str(RULE);
        report.push_str("\n\n");
        for (idx, step) in steps.iter().enumerate() {
            report.push_str(&format!("{:>3}. {}\n", idx + 1, step));
        }
    }

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Waypoint",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "query": {
                "source": data.source,
                "target": data.target
            },
            "graph": data.stats,
            "result": data.result,
            "steps": data.steps
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(data: &ReportData) -> String {
    let mut report = String::new();

    report.push_str("# Shortest Path Report\n\n");
    report.push_str("| Field | Value |\n|---|---|\n");
    report.push_str(&format!("| From | {} |\n", data.source));
    report.push_str(&format!("| To | {} |\n", data.target));
    report.push_str(&format!("| Nodes | {} |\n", data.stats.node_count));
    report.push_str(&format!("| Edges | {} |\n\n", data.stats.edge_count));

    match &data.result {
        PathResult::Found(path) => {
            report.push_str("## Result\n\n");
            report.push_str(&format!("**Path:** {}\n\n", path));
            report.push_str(&format!("**Total cost:** {}\n\n", path.cost));
            report.push_str("| Hop | From | To |\n|---|---|---|\n");
            for (idx, (from, to)) in path.edges().into_iter().enumerate() {
                report.push_str(&format!("| {} | {} | {} |\n", idx + 1, from, to));
            }
            report.push('\n');
        }
        PathResult::NoPath => {
            report.push_str("## Result\n\n_No path exists between the selected nodes._\n\n");
        }
    }

    if let Some(steps) = &data.steps {
        report.push_str("## Algorithm Steps\n\n");
        for (idx, step) in steps.iter().enumerate() {
            report.push_str(&format!("{}. {}\n", idx + 1, step));
        }
        report.push('\n');
    }

    report
}
