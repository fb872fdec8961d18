//! `cg graph` — structural summary of the citation graph and ingest counts.

use std::io::Write;

use anyhow::Result;
use citegraph_core::config::AnalysisConfig;
use citegraph_metrics::IngestStats;
use citegraph_metrics::graph::GraphSummary;
use clap::Args;
use serde::Serialize;

use super::common::{InputArgs, load};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `cg graph`.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub constraint: String,
    pub ingest: IngestStats,
    pub graph: GraphSummary,
}

/// Execute `cg graph`.
pub fn run_graph(args: &GraphArgs, config: &AnalysisConfig, output: OutputMode) -> Result<()> {
    let loaded = load(&args.input, config)?;
    let report = GraphReport {
        constraint: loaded.constraint(),
        graph: GraphSummary::compute(&loaded.output.graph, &loaded.output.table),
        ingest: loaded.output.stats,
    };
    render_mode(output, &report, render_graph_text, render_graph_pretty)
}

fn rows(report: &GraphReport) -> Vec<(String, usize)> {
    let ingest = &report.ingest;
    let graph = &report.graph;
    let mut rows = vec![
        ("lines".to_string(), ingest.lines),
        ("admitted".to_string(), ingest.admitted),
        ("replaced".to_string(), ingest.replaced),
    ];
    rows.extend(
        ingest
            .rejected
            .iter()
            .map(|(reason, count)| (format!("rejected.{reason}"), *count)),
    );
    rows.extend([
        ("out_of_range".to_string(), ingest.out_of_range),
        ("malformed_skipped".to_string(), ingest.malformed_skipped),
        ("nodes".to_string(), graph.node_count),
        ("edges".to_string(), graph.edge_count),
        ("records".to_string(), graph.record_count),
        ("dangling".to_string(), graph.dangling_count),
        ("self_loops".to_string(), graph.self_loop_count),
        (
            "components".to_string(),
            graph.weakly_connected_component_count,
        ),
        ("max_in_degree".to_string(), graph.max_in_degree),
        ("max_out_degree".to_string(), graph.max_out_degree),
    ]);
    rows
}

fn render_graph_text(report: &GraphReport, w: &mut dyn Write) -> std::io::Result<()> {
    for (key, value) in rows(report) {
        writeln!(w, "{key}\t{value}")?;
    }
    Ok(())
}

fn render_graph_pretty(report: &GraphReport, w: &mut dyn Write) -> std::io::Result<()> {
    let ingest = &report.ingest;
    let graph = &report.graph;

    pretty_section(w, "Ingest")?;
    pretty_kv(w, "Constraint", &report.constraint)?;
    pretty_kv(w, "Lines", ingest.lines.to_string())?;
    pretty_kv(w, "Admitted", ingest.admitted.to_string())?;
    pretty_kv(w, "Replaced", ingest.replaced.to_string())?;
    pretty_kv(w, "Rejected", ingest.rejected_total().to_string())?;
    for (reason, count) in &ingest.rejected {
        pretty_kv(w, &format!("  {reason}"), count.to_string())?;
    }
    pretty_kv(w, "Out of range", ingest.out_of_range.to_string())?;
    if ingest.malformed_skipped > 0 {
        pretty_kv(w, "Malformed", ingest.malformed_skipped.to_string())?;
    }

    writeln!(w)?;
    pretty_section(w, "Graph")?;
    pretty_kv(w, "Nodes", graph.node_count.to_string())?;
    pretty_kv(w, "Edges", graph.edge_count.to_string())?;
    pretty_kv(w, "With metadata", graph.record_count.to_string())?;
    pretty_kv(w, "Dangling", graph.dangling_count.to_string())?;
    pretty_kv(w, "Self-loops", graph.self_loop_count.to_string())?;
    pretty_kv(
        w,
        "Components",
        graph.weakly_connected_component_count.to_string(),
    )?;
    pretty_kv(w, "Max in-degree", graph.max_in_degree.to_string())?;
    pretty_kv(w, "Max out-degree", graph.max_out_degree.to_string())
}
