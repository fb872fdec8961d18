#![forbid(unsafe_code)]
//! citegraph-metrics library.
//!
//! Builds the citation graph and the per-record metadata table from a
//! stream of JSON lines, then reduces the table into per-author metrics.
//!
//! ```text
//! JSON lines
//!     ↓  pipeline::build_from_reader()   (validate, date window, ingest)
//! CitationGraph + MetadataTable
//!     ↓  rank::pagerank() + rank::apply_scores()   (optional)
//!     ├─ aggregate::aggregate()   → Vec<AuthorMetric> → chart::author_chart()
//!     └─ temporal::group_authors_by_debut_year()
//! ```
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` at the pipeline boundary, typed errors from
//!   `citegraph-core` below it.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod aggregate;
pub mod chart;
pub mod graph;
pub mod pipeline;
pub mod rank;
pub mod temporal;

pub use aggregate::{AuthorMetric, aggregate, top_n};
pub use graph::{CitationGraph, IngestOutcome, MetadataEntry, MetadataTable, ingest};
pub use pipeline::{BuildOutput, IngestOptions, IngestStats, MalformedPolicy};
