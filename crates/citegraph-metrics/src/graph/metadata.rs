//! Per-record metadata derived from admitted records.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use citegraph_core::{Metric, RecordId};
use serde::Serialize;

/// Metadata kept for one admitted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataEntry {
    /// Record identifier.
    pub recid: RecordId,
    /// Authors followed by co-authors.
    pub authors: Vec<String>,
    /// Length of the record's citation list.
    pub citation_count: usize,
    /// Parsed publication date (sentinel on parse failure).
    pub published: NaiveDateTime,
    /// Externally computed score, 0.0 until a scorer writes it.
    pub score: f64,
}

impl MetadataEntry {
    /// Value of `metric` for this entry.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Citations => self.citation_count as f64,
            Metric::Score => self.score,
        }
    }
}

/// Metadata entries keyed by record id.
///
/// Iteration follows the order in which each recid was first inserted.
/// Re-inserting a recid replaces its entry in place.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: Vec<MetadataEntry>,
    index: HashMap<RecordId, usize>,
}

impl MetadataTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `entry.recid`.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, entry: MetadataEntry) -> Option<MetadataEntry> {
        if let Some(&pos) = self.index.get(&entry.recid) {
            return Some(std::mem::replace(&mut self.entries[pos], entry));
        }
        self.index.insert(entry.recid.clone(), self.entries.len());
        self.entries.push(entry);
        None
    }

    #[must_use]
    pub fn get(&self, recid: &RecordId) -> Option<&MetadataEntry> {
        self.index.get(recid).map(|&pos| &self.entries[pos])
    }

    pub fn get_mut(&mut self, recid: &RecordId) -> Option<&mut MetadataEntry> {
        self.index.get(recid).map(|&pos| &mut self.entries[pos])
    }

    #[must_use]
    pub fn contains(&self, recid: &RecordId) -> bool {
        self.index.contains_key(recid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataEntry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, MetadataEntry> {
        self.entries.iter_mut()
    }
}

impl<'a> IntoIterator for &'a MetadataTable {
    type Item = &'a MetadataEntry;
    type IntoIter = std::slice::Iter<'a, MetadataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<MetadataEntry> for MetadataTable {
    fn from_iter<I: IntoIterator<Item = MetadataEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}
