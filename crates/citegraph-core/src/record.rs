//! Bibliographic record model and JSON-line parsing.
//!
//! Each input line is one self-contained JSON object:
//!
//! ```json
//! {"recid": 1, "title": "...", "authors": ["A"], "co-authors": [],
//!  "citations": [2], "references": [3], "creation_date": "2005-06-15"}
//! ```
//!
//! All seven keys are required; a missing key is reported as
//! [`RecordError::Malformed`]. Unknown keys are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Identifier of a bibliographic record.
///
/// Dumps mix integer and string identifiers. The two are kept distinct:
/// `1` and `"1"` name different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier (`"recid": 42`).
    Int(i64),
    /// Free-form identifier (`"recid": "arXiv:1234.5678"`).
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One bibliographic entry as it appears in the input stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier of this record.
    pub recid: RecordId,
    /// Title, matched case-insensitively against the low-quality blacklist.
    pub title: String,
    /// Primary authors.
    pub authors: Vec<String>,
    /// Secondary authors.
    #[serde(rename = "co-authors")]
    pub co_authors: Vec<String>,
    /// Records citing this one (each yields an edge `citation → recid`).
    pub citations: Vec<RecordId>,
    /// Records cited by this one (each yields an edge `recid → reference`).
    pub references: Vec<RecordId>,
    /// Free-text publication date, possibly malformed.
    pub creation_date: String,
}

impl Record {
    /// Parse a record from one JSON line.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Malformed`] if the line is not a JSON object
    /// or lacks any of the required keys.
    pub fn from_json_line(line: &str) -> Result<Self, RecordError> {
        serde_json::from_str(line).map_err(RecordError::Malformed)
    }

    /// Authors followed by co-authors.
    ///
    /// This is a plain concatenation: a name listed in both places is
    /// credited twice.
    #[must_use]
    pub fn merged_authors(&self) -> Vec<String> {
        self.authors
            .iter()
            .chain(self.co_authors.iter())
            .cloned()
            .collect()
    }

    /// Number of merged authors without allocating the merged list.
    #[must_use]
    pub fn merged_author_count(&self) -> usize {
        self.authors.len() + self.co_authors.len()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while reading records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The line is not a well-formed record object.
    #[error("malformed record: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A malformed record, annotated with its 1-based input line.
    #[error("malformed record on line {line}: {source}")]
    MalformedAt {
        /// 1-based line number in the input stream.
        line: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl RecordError {
    /// Attach a line number to a [`RecordError::Malformed`] error.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Malformed(source) => Self::MalformedAt { line, source },
            other @ Self::MalformedAt { .. } => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{"recid": 7, "title": "On Graphs", "authors": ["Alice"],
        "co-authors": ["Bob"], "citations": [1, "x-2"], "references": [3],
        "creation_date": "2005-06-15", "extra": true}"#;

    #[test]
    fn parses_full_record() {
        let rec = Record::from_json_line(FULL).expect("valid record");
        assert_eq!(rec.recid, RecordId::Int(7));
        assert_eq!(rec.title, "On Graphs");
        assert_eq!(rec.co_authors, vec!["Bob".to_string()]);
        assert_eq!(rec.citations, vec![RecordId::Int(1), RecordId::from("x-2")]);
        assert_eq!(rec.creation_date, "2005-06-15");
    }

    #[test]
    fn merged_authors_is_concatenation() {
        let mut rec = Record::from_json_line(FULL).expect("valid record");
        rec.co_authors.push("Alice".to_string());
        assert_eq!(rec.merged_authors(), vec!["Alice", "Bob", "Alice"]);
        assert_eq!(rec.merged_author_count(), 3);
    }

    #[test]
    fn missing_key_is_malformed() {
        let line = r#"{"recid": 1, "title": "t", "authors": [], "citations": [],
            "references": [], "creation_date": ""}"#;
        let err = Record::from_json_line(line).expect_err("co-authors missing");
        assert!(matches!(err, RecordError::Malformed(_)));
        assert!(err.to_string().contains("co-authors"));
    }

    #[test]
    fn non_json_is_malformed() {
        let err = Record::from_json_line("not json").expect_err("garbage");
        let err = err.at_line(12);
        assert!(err.to_string().contains("line 12"), "got: {err}");
    }

    #[test]
    fn int_and_string_ids_are_distinct() {
        assert_ne!(RecordId::Int(1), RecordId::from("1"));
        assert_eq!(RecordId::Int(1).to_string(), RecordId::from("1").to_string());
    }
}
