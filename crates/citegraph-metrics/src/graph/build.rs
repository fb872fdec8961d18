//! Incremental graph construction from record lines.
//!
//! # Overview
//!
//! [`ingest`] parses one JSON line, runs the admission rules and the
//! optional date window, and on success adds the record's citation and
//! reference edges to a [`CitationGraph`] and writes its
//! [`MetadataEntry`].
//!
//! Rejected records leave both structures untouched; the caller learns why
//! through [`IngestOutcome`] but no error is raised. Malformed lines are
//! errors.
//!
//! ## Duplicates
//!
//! Parallel edges and self-loops are kept as given: a record listing the
//! same citation twice contributes two edges. Re-ingesting a recid
//! overwrites its metadata entry (score back to 0.0) and adds its edges
//! again.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use citegraph_core::{
    DateRange, Record, RecordError, RecordId, Rejection, date::parse_date_or_default, in_range,
    validate::rejection,
};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::trace;

use super::metadata::{MetadataEntry, MetadataTable};

// ---------------------------------------------------------------------------
// CitationGraph
// ---------------------------------------------------------------------------

/// A directed citation graph.
///
/// Nodes are record ids. An edge `A → B` means "A cites B".
#[derive(Debug, Clone, Default)]
pub struct CitationGraph {
    /// Directed graph: nodes = record ids, edges = citations.
    pub graph: DiGraph<RecordId, ()>,
    /// Mapping from record id to petgraph `NodeIndex`.
    pub node_map: HashMap<RecordId, NodeIndex>,
}

impl CitationGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `id`, creating it on first mention.
    pub fn ensure_node(&mut self, id: &RecordId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_map.insert(id.clone(), idx);
        idx
    }

    /// Add the edge `from → to`. Duplicates and self-loops are kept.
    pub fn add_edge(&mut self, from: &RecordId, to: &RecordId) {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        self.graph.add_edge(a, b, ());
    }

    /// Return the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges in the graph, counting duplicates.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a record id.
    #[must_use]
    pub fn node_index(&self, id: &RecordId) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return the record id label for a node.
    #[must_use]
    pub fn record_id(&self, idx: NodeIndex) -> Option<&RecordId> {
        self.graph.node_weight(idx)
    }

    /// Returns `true` if at least one edge `from → to` exists.
    #[must_use]
    pub fn contains_edge(&self, from: &RecordId, to: &RecordId) -> bool {
        match (self.node_index(from), self.node_index(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// All edges as `(from, to)` id pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&RecordId, &RecordId)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
    }

    /// Number of edges pointing at `id` (times it is cited).
    #[must_use]
    pub fn in_degree(&self, id: &RecordId) -> usize {
        self.node_index(id).map_or(0, |idx| {
            self.graph.edges_directed(idx, Direction::Incoming).count()
        })
    }

    /// Number of edges leaving `id` (references it makes).
    #[must_use]
    pub fn out_degree(&self, id: &RecordId) -> usize {
        self.node_index(id).map_or(0, |idx| {
            self.graph.edges_directed(idx, Direction::Outgoing).count()
        })
    }
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// What [`ingest`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Edges and metadata were written. `replaced` is set when the recid
    /// already had an entry.
    Admitted { replaced: bool },
    /// The record failed an admission rule and was skipped.
    Rejected(Rejection),
    /// The record's date fell outside the window and was skipped.
    OutOfRange,
}

/// Parse one record line and fold it into `graph` and `table`.
///
/// # Errors
///
/// Returns [`RecordError::Malformed`] if the line is not a well-formed
/// record. Rejected or out-of-window records are not errors.
pub fn ingest(
    line: &str,
    graph: &mut CitationGraph,
    table: &mut MetadataTable,
    range: Option<&DateRange>,
) -> Result<IngestOutcome, RecordError> {
    let record = Record::from_json_line(line)?;
    Ok(ingest_record(record, graph, table, range))
}

/// Fold an already-parsed record into `graph` and `table`.
pub fn ingest_record(
    record: Record,
    graph: &mut CitationGraph,
    table: &mut MetadataTable,
    range: Option<&DateRange>,
) -> IngestOutcome {
    if let Some(reason) = rejection(&record) {
        trace!(recid = %record.recid, %reason, "record rejected");
        return IngestOutcome::Rejected(reason);
    }
    if !in_range(&record, range) {
        trace!(recid = %record.recid, date = %record.creation_date, "record outside date range");
        return IngestOutcome::OutOfRange;
    }

    for citation in &record.citations {
        graph.add_edge(citation, &record.recid);
    }
    for reference in &record.references {
        graph.add_edge(&record.recid, reference);
    }

    let authors = record.merged_authors();
    let entry = MetadataEntry {
        citation_count: record.citations.len(),
        published: parse_date_or_default(&record.creation_date),
        score: 0.0,
        authors,
        recid: record.recid,
    };
    let replaced = table.insert(entry).is_some();

    IngestOutcome::Admitted { replaced }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> RecordId {
        RecordId::Int(n)
    }

    fn run(lines: &[&str], range: Option<&DateRange>) -> (CitationGraph, MetadataTable) {
        let mut graph = CitationGraph::new();
        let mut table = MetadataTable::new();
        for line in lines {
            ingest(line, &mut graph, &mut table, range).expect("well-formed line");
        }
        (graph, table)
    }

    const A: &str = r#"{"recid": 1, "title": "Paper A", "authors": ["Alice"], "co-authors": [],
        "citations": [2], "references": [3], "creation_date": "2005-06-15"}"#;
    const B: &str = r#"{"recid": 2, "title": "Paper B", "authors": ["Bob"], "co-authors": [],
        "citations": [], "references": [1], "creation_date": "2006-01-01"}"#;

    #[test]
    fn rejected_record_adds_nothing() {
        let (graph, table) = run(&[A, B], None);

        // A contributes 2 → 1 (citation) and 1 → 3 (reference); B is rejected.
        assert!(graph.contains_edge(&id(1), &id(3)));
        assert!(graph.contains_edge(&id(2), &id(1)));
        assert!(!graph.contains_edge(&id(1), &id(2)));
        assert_eq!(graph.edge_count(), 2);

        assert_eq!(table.len(), 1);
        assert!(table.contains(&id(1)));
        assert!(!table.contains(&id(2)));
    }

    #[test]
    fn outcome_reports_reason() {
        let mut graph = CitationGraph::new();
        let mut table = MetadataTable::new();
        let outcome = ingest(B, &mut graph, &mut table, None).expect("parse");
        assert_eq!(outcome, IngestOutcome::Rejected(Rejection::NoCitations));
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn edge_directions() {
        let line = r#"{"recid": 10, "title": "x", "authors": ["A"], "co-authors": ["B"],
            "citations": [20, 21], "references": [30], "creation_date": "2001"}"#;
        let (graph, table) = run(&[line], None);

        assert!(graph.contains_edge(&id(20), &id(10)));
        assert!(graph.contains_edge(&id(21), &id(10)));
        assert!(graph.contains_edge(&id(10), &id(30)));
        assert_eq!(graph.in_degree(&id(10)), 2);
        assert_eq!(graph.out_degree(&id(10)), 1);
        let idx = graph.node_index(&id(10)).expect("node");
        assert_eq!(graph.record_id(idx), Some(&id(10)));

        let entry = table.get(&id(10)).expect("entry");
        assert_eq!(entry.authors, vec!["A", "B"]);
        assert_eq!(entry.citation_count, 2);
        assert!(entry.score.abs() < f64::EPSILON);
    }

    #[test]
    fn cited_only_ids_are_nodes_without_metadata() {
        let (graph, table) = run(&[A], None);
        assert!(graph.node_index(&id(3)).is_some());
        assert!(table.get(&id(3)).is_none());
    }

    #[test]
    fn duplicates_and_self_loops_are_kept() {
        let line = r#"{"recid": 5, "title": "x", "authors": ["A"], "co-authors": [],
            "citations": [5, 6, 6], "references": [5], "creation_date": ""}"#;
        let (graph, _) = run(&[line], None);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.node_count(), 2);
        let self_loops = graph.edges().filter(|(a, b)| a == b).count();
        assert_eq!(self_loops, 2);
    }

    #[test]
    fn reingest_overwrites_and_resets_score() {
        let mut graph = CitationGraph::new();
        let mut table = MetadataTable::new();
        ingest(A, &mut graph, &mut table, None).expect("parse");
        table.get_mut(&id(1)).expect("entry").score = 0.5;

        let outcome = ingest(A, &mut graph, &mut table, None).expect("parse");
        assert_eq!(outcome, IngestOutcome::Admitted { replaced: true });
        assert!(table.get(&id(1)).expect("entry").score.abs() < f64::EPSILON);
        assert_eq!(table.len(), 1);
        // Edges are appended again.
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn date_window_filters() {
        let range = DateRange::parse("2006-01-01", "2010-01-01").expect("range");
        let mut graph = CitationGraph::new();
        let mut table = MetadataTable::new();
        let outcome = ingest(A, &mut graph, &mut table, Some(&range)).expect("parse");
        assert_eq!(outcome, IngestOutcome::OutOfRange);
        assert!(table.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn malformed_line_is_error() {
        let mut graph = CitationGraph::new();
        let mut table = MetadataTable::new();
        let err = ingest("{\"recid\": 1}", &mut graph, &mut table, None);
        assert!(err.is_err());
    }

    #[test]
    fn string_ids_mix_with_ints() {
        let line = r#"{"recid": "hep-th/9901001", "title": "x", "authors": ["A"],
            "co-authors": [], "citations": [7], "references": ["hep-th/9801002"],
            "creation_date": "1999-01-04"}"#;
        let (graph, table) = run(&[line], None);
        assert!(graph.contains_edge(&id(7), &RecordId::from("hep-th/9901001")));
        assert!(table.contains(&RecordId::from("hep-th/9901001")));
    }
}
