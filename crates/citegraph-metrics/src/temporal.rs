//! Debut year of each author.
//!
//! An author's debut is the year of the earliest publication date among
//! their admitted records. Records whose date could not be parsed carry the
//! 1900 sentinel, so such an author debuts in 1900.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};

use crate::graph::MetadataTable;

/// Author → year of their earliest admitted record.
#[must_use]
pub fn author_first_publication_years(table: &MetadataTable) -> BTreeMap<String, i32> {
    let mut earliest: BTreeMap<String, NaiveDateTime> = BTreeMap::new();

    for entry in table {
        for author in &entry.authors {
            earliest
                .entry(author.clone())
                .and_modify(|d| {
                    if entry.published < *d {
                        *d = entry.published;
                    }
                })
                .or_insert(entry.published);
        }
    }

    earliest
        .into_iter()
        .map(|(author, date)| (author, date.year()))
        .collect()
}

/// Debut year → authors debuting that year.
///
/// The exact inverse of [`author_first_publication_years`]: every author
/// appears in exactly one bucket. Years ascend; authors within a year are
/// sorted by name.
#[must_use]
pub fn group_authors_by_debut_year(table: &MetadataTable) -> BTreeMap<i32, Vec<String>> {
    let mut by_year: BTreeMap<i32, Vec<String>> = BTreeMap::new();
    for (author, year) in author_first_publication_years(table) {
        by_year.entry(year).or_default().push(author);
    }
    by_year
}

/// Number of authors debuting in each year, years ascending.
#[must_use]
pub fn debut_histogram(table: &MetadataTable) -> Vec<(i32, usize)> {
    group_authors_by_debut_year(table)
        .into_iter()
        .map(|(year, authors)| (year, authors.len()))
        .collect()
}
