//! Citation graph and per-record metadata table.
//!
//! # Overview
//!
//! [`build::ingest`] turns one admitted record into graph edges plus one
//! [`MetadataEntry`]. The graph is a petgraph [`DiGraph`] keyed by
//! [`RecordId`]; the metadata table holds the fields the author
//! aggregation reads.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A cites B". A record `R` contributes
//! `c → R` for each entry `c` of its citation list and `R → r` for each
//! entry `r` of its reference list.
//!
//! ## Dangling Nodes
//!
//! Identifiers that only appear inside another record's citation or
//! reference list become nodes without a metadata entry. Everything that
//! joins graph nodes with metadata must tolerate the missing entry.
//!
//! [`DiGraph`]: petgraph::graph::DiGraph
//! [`RecordId`]: citegraph_core::RecordId

pub mod build;
pub mod metadata;
pub mod stats;

pub use build::{CitationGraph, IngestOutcome, ingest, ingest_record};
pub use metadata::{MetadataEntry, MetadataTable};
pub use stats::GraphSummary;
