//! Summary statistics for a built citation graph.
//!
//! - **node_count** / **edge_count**: raw sizes, duplicates included.
//! - **record_count**: admitted records (metadata entries).
//! - **dangling_count**: nodes with no metadata entry (cited or referenced
//!   works never seen as records, or records that were rejected).
//! - **self_loop_count**: edges from a node to itself.
//! - **weakly_connected_component_count**: disjoint sub-networks.
//! - **max_in_degree** / **max_out_degree**: most-cited node and the node
//!   with the longest reference list, counted in edges.

use petgraph::{Direction, algo::connected_components, visit::IntoNodeIdentifiers};
use serde::Serialize;

use super::build::CitationGraph;
use super::metadata::MetadataTable;

/// Summary statistics for a [`CitationGraph`] and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub record_count: usize,
    pub dangling_count: usize,
    pub self_loop_count: usize,
    pub weakly_connected_component_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphSummary {
    /// Compute statistics for `graph` joined with `table`.
    #[must_use]
    pub fn compute(graph: &CitationGraph, table: &MetadataTable) -> Self {
        let g = &graph.graph;

        let dangling_count = g
            .node_identifiers()
            .filter(|&idx| !table.contains(&g[idx]))
            .count();

        let self_loop_count = graph.edges().filter(|(a, b)| a == b).count();

        let degree = |dir: Direction| {
            g.node_identifiers()
                .map(|idx| g.edges_directed(idx, dir).count())
                .max()
                .unwrap_or(0)
        };

        Self {
            node_count: g.node_count(),
            edge_count: g.edge_count(),
            record_count: table.len(),
            dangling_count,
            self_loop_count,
            weakly_connected_component_count: connected_components(g),
            max_in_degree: degree(Direction::Incoming),
            max_out_degree: degree(Direction::Outgoing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build::ingest;

    #[test]
    fn empty_graph() {
        let summary = GraphSummary::compute(&CitationGraph::new(), &MetadataTable::new());
        assert_eq!(summary.node_count, 0);
        assert_eq!(summary.max_in_degree, 0);
        assert_eq!(summary.weakly_connected_component_count, 0);
    }

    #[test]
    fn counts_dangling_and_components() {
        let mut graph = CitationGraph::new();
        let mut table = MetadataTable::new();
        for line in [
            r#"{"recid": 1, "title": "a", "authors": ["A"], "co-authors": [],
                "citations": [2, 4], "references": [3], "creation_date": "2001"}"#,
            r#"{"recid": 10, "title": "b", "authors": ["B"], "co-authors": [],
                "citations": [10], "references": [11], "creation_date": "2001"}"#,
        ] {
            ingest(line, &mut graph, &mut table, None).expect("parse");
        }

        let summary = GraphSummary::compute(&graph, &table);
        assert_eq!(summary.node_count, 6);
        assert_eq!(summary.edge_count, 5);
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.dangling_count, 4);
        assert_eq!(summary.self_loop_count, 1);
        assert_eq!(summary.weakly_connected_component_count, 2);
        assert_eq!(summary.max_in_degree, 2);
    }
}
