//! PageRank over the citation graph.
//!
//! # Overview
//!
//! The score field of each metadata entry is filled by an external ranking
//! step; this module provides the default one. A record cited by many
//! well-cited records ranks high.
//!
//! # Algorithm
//!
//! Power iteration on the raw citation graph:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / out_degree(u)   for each edge u → v
//! ```
//!
//! where `d` is the damping factor (default 0.85). Parallel edges each
//! carry a share, so a record listing the same reference twice passes it
//! twice the rank. Dangling nodes (no outgoing edges) spread their rank
//! uniformly over all nodes.

use std::collections::HashMap;

use citegraph_core::RecordId;
use citegraph_core::config::PageRankSettings;
use petgraph::{
    Direction,
    visit::{EdgeRef, IntoNodeIdentifiers, NodeIndexable},
};
use tracing::{info, instrument, warn};

use crate::graph::{CitationGraph, MetadataTable};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    pub damping: f64,
    /// Convergence threshold: stop when L1 norm of rank delta < tolerance.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self::from(&PageRankSettings::default())
    }
}

impl From<&PageRankSettings> for PageRankConfig {
    fn from(settings: &PageRankSettings) -> Self {
        Self {
            damping: settings.damping,
            tolerance: settings.tolerance,
            max_iter: settings.max_iter,
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// PageRank scores: record id → score. Sums to 1 for a non-empty graph.
    pub scores: HashMap<RecordId, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

/// Compute PageRank for every node of `graph`.
#[must_use]
#[instrument(skip(graph, config), fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(graph: &CitationGraph, config: &PageRankConfig) -> PageRankResult {
    let g = &graph.graph;
    let n = g.node_count();

    if n == 0 {
        return PageRankResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;

    // Out-degree counts parallel edges.
    let out_degree: Vec<usize> = g
        .node_identifiers()
        .map(|node| g.edges_directed(node, Direction::Outgoing).count())
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        // Dangling mass is shared by everyone.
        let dangling: f64 = g
            .node_identifiers()
            .filter(|&node| out_degree[g.to_index(node)] == 0)
            .map(|node| ranks[g.to_index(node)])
            .sum();
        let teleport = base + config.damping * dangling / n_f64;

        for r in &mut new_ranks {
            *r = teleport;
        }

        for edge in g.edge_references() {
            let src = g.to_index(edge.source());
            let dst = g.to_index(edge.target());
            new_ranks[dst] += config.damping * ranks[src] / out_degree[src] as f64;
        }

        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(iterations, "pagerank did not converge");
    }

    let scores = g
        .node_identifiers()
        .map(|node| (g[node].clone(), ranks[g.to_index(node)]))
        .collect();

    PageRankResult {
        scores,
        iterations,
        converged,
    }
}

/// Write PageRank scores into the metadata table.
///
/// Entries without a score in `result` are left unchanged; scored nodes
/// without an entry are skipped. Returns the number of entries updated.
pub fn apply_scores(table: &mut MetadataTable, result: &PageRankResult) -> usize {
    let mut updated = 0;
    for entry in table.iter_mut() {
        if let Some(&score) = result.scores.get(&entry.recid) {
            entry.score = score;
            updated += 1;
        }
    }
    info!(updated, iterations = result.iterations, "applied pagerank scores");
    updated
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ingest;

    fn graph_from(edges: &[(i64, i64)]) -> CitationGraph {
        let mut graph = CitationGraph::new();
        for &(a, b) in edges {
            graph.add_edge(&RecordId::Int(a), &RecordId::Int(b));
        }
        graph
    }

    fn score(result: &PageRankResult, id: i64) -> f64 {
        result.scores[&RecordId::Int(id)]
    }

    #[test]
    fn empty_graph_converges_trivially() {
        let result = pagerank(&CitationGraph::new(), &PageRankConfig::default());
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn scores_sum_to_one() {
        let graph = graph_from(&[(1, 2), (2, 3), (3, 1), (4, 1), (5, 5)]);
        let result = pagerank(&graph, &PageRankConfig::default());
        let total: f64 = result.scores.values().sum();
        assert!((total - 1.0).abs() < 1e-6, "total = {total}");
        assert!(result.converged);
    }

    #[test]
    fn heavily_cited_node_ranks_highest() {
        // 2, 3, 4 all cite 1.
        let graph = graph_from(&[(2, 1), (3, 1), (4, 1)]);
        let result = pagerank(&graph, &PageRankConfig::default());
        for other in [2, 3, 4] {
            assert!(score(&result, 1) > score(&result, other));
        }
    }

    #[test]
    fn symmetric_cycle_is_uniform() {
        let graph = graph_from(&[(1, 2), (2, 3), (3, 1)]);
        let result = pagerank(&graph, &PageRankConfig::default());
        for id in [1, 2, 3] {
            assert!((score(&result, id) - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn max_iter_bounds_work() {
        let graph = graph_from(&[(1, 2), (2, 3), (3, 4)]);
        let config = PageRankConfig {
            max_iter: 1,
            tolerance: 0.0,
            ..PageRankConfig::default()
        };
        let result = pagerank(&graph, &config);
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
    }

    #[test]
    fn apply_scores_skips_dangling_nodes() {
        let mut graph = CitationGraph::new();
        let mut table = MetadataTable::new();
        let line = r#"{"recid": 1, "title": "x", "authors": ["A"], "co-authors": [],
            "citations": [2], "references": [3], "creation_date": "2001"}"#;
        ingest(line, &mut graph, &mut table, None).expect("parse");

        let result = pagerank(&graph, &PageRankConfig::default());
        assert_eq!(result.scores.len(), 3);

        let updated = apply_scores(&mut table, &result);
        assert_eq!(updated, 1);
        let entry = table.get(&RecordId::Int(1)).expect("entry");
        assert!((entry.score - score(&result, 1)).abs() < f64::EPSILON);
    }
}
