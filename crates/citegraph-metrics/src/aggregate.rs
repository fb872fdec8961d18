//! Per-author reduction of the metadata table.
//!
//! Every author listed on a record is credited with that record's metric
//! value. With normalization the value is split evenly instead, each of the
//! `k` merged authors receiving `value / k`, so the sum over all authors
//! equals the sum over all records.
//!
//! Results are sorted by value, highest first. The sort is stable: authors
//! with equal totals keep the order in which they were first encountered
//! while walking the table.

use std::collections::HashMap;

use citegraph_core::Metric;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::MetadataTable;

/// One author's accumulated metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorMetric {
    pub author: String,
    pub value: f64,
}

/// Accumulator keyed by author, preserving first-encounter order.
#[derive(Debug, Default)]
struct AuthorTotals {
    totals: Vec<AuthorMetric>,
    slots: HashMap<String, usize>,
}

impl AuthorTotals {
    /// Running total for `author`, created at zero on first access.
    fn slot(&mut self, author: &str) -> &mut f64 {
        let pos = if let Some(&pos) = self.slots.get(author) {
            pos
        } else {
            let pos = self.totals.len();
            self.slots.insert(author.to_string(), pos);
            self.totals.push(AuthorMetric {
                author: author.to_string(),
                value: 0.0,
            });
            pos
        };
        &mut self.totals[pos].value
    }

    fn into_sorted(self) -> Vec<AuthorMetric> {
        let mut totals = self.totals;
        totals.sort_by(|a, b| b.value.total_cmp(&a.value));
        totals
    }
}

/// Share of a record's value credited to each of its `author_count` authors.
#[allow(clippy::cast_precision_loss)]
fn normalization_factor(author_count: usize, normalize: bool) -> f64 {
    if normalize && author_count > 0 {
        1.0 / author_count as f64
    } else {
        1.0
    }
}

/// Sum `metric` per author over every entry of `table`.
///
/// Returns authors sorted by total, descending, ties in first-encounter
/// order.
#[must_use]
#[instrument(skip(table), fields(entries = table.len()))]
pub fn aggregate(table: &MetadataTable, metric: Metric, normalize: bool) -> Vec<AuthorMetric> {
    let mut acc = AuthorTotals::default();

    for entry in table {
        let share = entry.metric(metric) * normalization_factor(entry.authors.len(), normalize);
        for author in &entry.authors {
            *acc.slot(author) += share;
        }
    }

    let sorted = acc.into_sorted();
    debug!(authors = sorted.len(), "aggregated author metrics");
    sorted
}

/// The first `n` entries of a sorted metric list.
#[must_use]
pub fn top_n(metrics: &[AuthorMetric], n: usize) -> &[AuthorMetric] {
    &metrics[..n.min(metrics.len())]
}
