//! Admission rules for bibliographic records.
//!
//! A record is dropped from the analysis when its title marks it as a
//! low-quality entry (proceedings, theses, withdrawn papers, ...) or when it
//! is disconnected from the citation network: no authors, no citations, or
//! no references.

use std::fmt;

use serde::Serialize;

use crate::record::Record;

/// Title substrings that mark a record as low quality.
///
/// Matched against the lowercased title as plain substrings, so
/// `"Conferences"` and `"Proceedings"` both hit.
pub const BLACKLISTED_TITLE_WORDS: [&str; 7] = [
    "proceedings",
    "proceeding",
    "withdrawn",
    "thesis",
    "conference",
    "canceled",
    "cancelled",
];

/// Why a record was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Title contains a blacklisted substring.
    BlacklistedTitle,
    /// Neither authors nor co-authors are listed.
    NoAuthors,
    /// Nobody cites the record.
    NoCitations,
    /// The record cites nothing.
    NoReferences,
}

impl Rejection {
    /// Stable snake-case label used in logs and statistics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlacklistedTitle => "blacklisted_title",
            Self::NoAuthors => "no_authors",
            Self::NoCitations => "no_citations",
            Self::NoReferences => "no_references",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if the lowercased title contains a blacklisted word.
#[must_use]
pub fn has_blacklisted_title(title: &str) -> bool {
    let lowered = title.to_lowercase();
    BLACKLISTED_TITLE_WORDS
        .iter()
        .any(|word| lowered.contains(word))
}

/// First admission rule the record fails, checked in order: title,
/// authors, citations, references.
#[must_use]
pub fn rejection(record: &Record) -> Option<Rejection> {
    if has_blacklisted_title(&record.title) {
        return Some(Rejection::BlacklistedTitle);
    }
    if record.authors.is_empty() && record.co_authors.is_empty() {
        return Some(Rejection::NoAuthors);
    }
    if record.citations.is_empty() {
        return Some(Rejection::NoCitations);
    }
    if record.references.is_empty() {
        return Some(Rejection::NoReferences);
    }
    None
}

/// Returns `true` if the record passes every admission rule.
#[must_use]
pub fn is_admissible(record: &Record) -> bool {
    rejection(record).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;
    use proptest::prelude::*;

    fn good() -> Record {
        Record {
            recid: RecordId::Int(1),
            title: "Lattice gauge theory at finite density".to_string(),
            authors: vec!["Alice".to_string()],
            co_authors: vec![],
            citations: vec![RecordId::Int(2)],
            references: vec![RecordId::Int(3)],
            creation_date: "2005-06-15".to_string(),
        }
    }

    #[test]
    fn good_record_is_admissible() {
        assert!(is_admissible(&good()));
        assert_eq!(rejection(&good()), None);
    }

    #[test]
    fn blacklisted_title_rejected_case_insensitively() {
        for title in [
            "PROCEEDINGS of the workshop",
            "A Thesis on Strings",
            "Withdrawn: paper",
            "International Conferences",
            "Talk canceled",
            "Talk Cancelled",
        ] {
            let mut rec = good();
            rec.title = title.to_string();
            assert_eq!(rejection(&rec), Some(Rejection::BlacklistedTitle), "{title}");
        }
    }

    #[test]
    fn substring_match_not_whole_word() {
        let mut rec = good();
        rec.title = "Hypotheses and antitheses".to_string();
        // "antitheses" does not contain "thesis"; "hypothesis" would.
        assert!(is_admissible(&rec));
        rec.title = "Hypothesis testing".to_string();
        assert!(!is_admissible(&rec));
    }

    #[test]
    fn co_authors_alone_are_enough() {
        let mut rec = good();
        rec.authors.clear();
        rec.co_authors.push("Bob".to_string());
        assert!(is_admissible(&rec));
    }

    #[test]
    fn empty_lists_rejected_in_order() {
        let mut rec = good();
        rec.authors.clear();
        rec.citations.clear();
        assert_eq!(rejection(&rec), Some(Rejection::NoAuthors));

        let mut rec = good();
        rec.citations.clear();
        rec.references.clear();
        assert_eq!(rejection(&rec), Some(Rejection::NoCitations));

        let mut rec = good();
        rec.references.clear();
        assert_eq!(rejection(&rec), Some(Rejection::NoReferences));
    }

    proptest! {
        #[test]
        fn any_title_with_blacklisted_word_is_rejected(
            prefix in "[a-zA-Z ]{0,12}",
            suffix in "[a-zA-Z ]{0,12}",
            idx in 0usize..BLACKLISTED_TITLE_WORDS.len(),
            upper in any::<bool>(),
        ) {
            let word = BLACKLISTED_TITLE_WORDS[idx];
            let word = if upper { word.to_uppercase() } else { word.to_string() };
            let mut rec = good();
            rec.title = format!("{prefix}{word}{suffix}");
            prop_assert!(!is_admissible(&rec));
        }
    }
}
