//! Batch ingestion of a JSON-lines record dump.
//!
//! Lines are processed one at a time, in order, into a single
//! [`CitationGraph`] and [`MetadataTable`]. Blank lines are ignored.
//!
//! A malformed line aborts the build by default. With
//! [`MalformedPolicy::Skip`] it is logged at `warn` and counted instead.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use citegraph_core::{DateRange, RecordError, Rejection};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::graph::{CitationGraph, IngestOutcome, MetadataTable, ingest};

/// What to do with a line that is not a well-formed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Stop and return the error.
    #[default]
    Fail,
    /// Log a warning and continue.
    Skip,
}

/// Options for [`build_from_reader`].
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Only admit records strictly inside this window.
    pub date_range: Option<DateRange>,
    pub malformed: MalformedPolicy,
}

/// Counters collected during a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Non-blank lines read.
    pub lines: usize,
    pub admitted: usize,
    /// Admitted records whose recid had already been seen.
    pub replaced: usize,
    pub rejected: BTreeMap<Rejection, usize>,
    pub out_of_range: usize,
    pub malformed_skipped: usize,
}

impl IngestStats {
    /// Total records rejected by any admission rule.
    #[must_use]
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    fn record(&mut self, outcome: IngestOutcome) {
        match outcome {
            IngestOutcome::Admitted { replaced } => {
                self.admitted += 1;
                if replaced {
                    self.replaced += 1;
                }
            }
            IngestOutcome::Rejected(reason) => *self.rejected.entry(reason).or_insert(0) += 1,
            IngestOutcome::OutOfRange => self.out_of_range += 1,
        }
    }
}

/// The products of a build.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub graph: CitationGraph,
    pub table: MetadataTable,
    pub stats: IngestStats,
}

/// Build the graph and metadata table from a line-oriented reader.
///
/// # Errors
///
/// Returns an error on I/O failure, or on the first malformed line when
/// `options.malformed` is [`MalformedPolicy::Fail`]; the error carries the
/// 1-based line number.
#[instrument(skip(reader, options))]
pub fn build_from_reader<R: BufRead>(reader: R, options: &IngestOptions) -> Result<BuildOutput> {
    let mut out = BuildOutput::default();
    let range = options.date_range.as_ref();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        out.stats.lines += 1;

        match ingest(&line, &mut out.graph, &mut out.table, range) {
            Ok(outcome) => out.stats.record(outcome),
            Err(err) => match options.malformed {
                MalformedPolicy::Fail => return Err(err.at_line(line_no).into()),
                MalformedPolicy::Skip => {
                    let err: RecordError = err.at_line(line_no);
                    warn!(%err, "skipping malformed line");
                    out.stats.malformed_skipped += 1;
                }
            },
        }
    }

    info!(
        lines = out.stats.lines,
        admitted = out.stats.admitted,
        rejected = out.stats.rejected_total(),
        out_of_range = out.stats.out_of_range,
        nodes = out.graph.node_count(),
        edges = out.graph.edge_count(),
        "citation graph built"
    );

    Ok(out)
}

/// Build from a JSON-lines file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the build fails.
pub fn build_from_path(path: &Path, options: &IngestOptions) -> Result<BuildOutput> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    build_from_reader(BufReader::new(file), options)
        .with_context(|| format!("Failed to ingest {}", path.display()))
}
