//! Per-record numeric fields that can be aggregated by author.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A numeric field of a metadata entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Number of records citing the entry.
    #[default]
    Citations,
    /// Externally computed score (PageRank by default).
    #[serde(alias = "pagerank")]
    Score,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Self; 2] = [Self::Citations, Self::Score];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citations => "citations",
            Self::Score => "score",
        }
    }

    /// Human label used in chart titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Citations => "Citations",
            Self::Score => "PageRank",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric name that names no metadata field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric {0:?} (expected one of: citations, score, pagerank)")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "citations" | "citation_count" => Ok(Self::Citations),
            "score" | "pagerank" => Ok(Self::Score),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("citations".parse(), Ok(Metric::Citations));
        assert_eq!("PageRank".parse(), Ok(Metric::Score));
        assert_eq!(" score ".parse(), Ok(Metric::Score));
    }

    #[test]
    fn unknown_name_is_error() {
        let err = "h-index".parse::<Metric>().expect_err("no such field");
        assert_eq!(err, UnknownMetric("h-index".to_string()));
    }

    #[test]
    fn display_round_trips() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse(), Ok(metric));
        }
    }
}
