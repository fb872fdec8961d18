use std::fmt;

/// Machine-readable error codes surfaced by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InputNotFound,
    ConfigNotFound,
    MalformedRecord,
    InvalidDateRange,
    UnknownMetric,
    OutputWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InputNotFound => "E1002",
            Self::ConfigNotFound => "E1003",
            Self::MalformedRecord => "E2001",
            Self::InvalidDateRange => "E2002",
            Self::UnknownMetric => "E2003",
            Self::OutputWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InputNotFound => "Input file not found",
            Self::ConfigNotFound => "Config file not found",
            Self::MalformedRecord => "Malformed input record",
            Self::InvalidDateRange => "Invalid date range",
            Self::UnknownMetric => "Unknown metric",
            Self::OutputWriteFailed => "Output write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in citegraph.toml and retry."),
            Self::InputNotFound => Some("Pass the path of a JSON-lines record dump."),
            Self::ConfigNotFound => Some("Check the --config path, or omit it to use defaults."),
            Self::MalformedRecord => {
                Some("Repair the line, or pass --skip-malformed to ignore bad lines.")
            }
            Self::InvalidDateRange => Some("Use dates like 2000-01-01 for --from and --to."),
            Self::UnknownMetric => Some("Use one of: citations, score, pagerank."),
            Self::OutputWriteFailed => None,
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::InputNotFound,
            ErrorCode::ConfigNotFound,
            ErrorCode::MalformedRecord,
            ErrorCode::InvalidDateRange,
            ErrorCode::UnknownMetric,
            ErrorCode::OutputWriteFailed,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::MalformedRecord.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }
}
