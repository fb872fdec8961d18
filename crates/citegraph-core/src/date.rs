//! Lenient publication-date parsing and the optional date window.
//!
//! Record dates in bibliographic dumps are free text: ISO timestamps, US
//! style `MM-DD-YYYY`, bare years, month names. [`parse_date`] tries a fixed
//! list of layouts; [`parse_date_or_default`] substitutes the sentinel
//! 1900-01-01 when none matches, so a bad date never aborts ingestion.
//!
//! Strings starting with four digits are read year-first; anything else is
//! read month-first (`01-02-2000` is January 2nd), retried day-first when
//! the month-first reading is impossible (`15-06-2005`). `YYYY-MM`, `YYYY`
//! and `Month YYYY` pin the missing parts to the first day; `YYYYMMDD` is
//! accepted as a compact date.
//!
//! The year must appear as four digits. Two-digit years (`15 June 05`) and
//! ambiguous day/month orders beyond the retry above are not guessed and
//! fall back to the sentinel.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::record::Record;

/// Year of the sentinel date substituted for unparseable input.
pub const SENTINEL_YEAR: i32 = 1900;

const YEAR_FIRST_DATETIME: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const YEAR_FIRST_DATE: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const MONTH_FIRST_DATE: [&str; 8] = [
    "%m-%d-%Y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

const DAY_FIRST_DATE: [&str; 3] = ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

/// `Month YYYY`, parsed with a day of 1 prepended.
const MONTH_YEAR_DATE: [&str; 2] = ["%d %B %Y", "%d %b %Y"];

/// The sentinel date, 1900-01-01T00:00:00.
#[must_use]
pub fn sentinel_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(SENTINEL_YEAR, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Parse a free-text date, returning `None` if no known layout matches.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    if starts_with_year(s) {
        parse_year_first(s)
    } else {
        parse_month_first(s)
    }
}

/// Parse a free-text date, falling back to [`sentinel_date`] on failure.
#[must_use]
pub fn parse_date_or_default(raw: &str) -> NaiveDateTime {
    parse_date(raw).unwrap_or_else(sentinel_date)
}

fn starts_with_year(s: &str) -> bool {
    s.len() >= 4 && s.as_bytes()[..4].iter().all(u8::is_ascii_digit)
}

fn parse_year_first(s: &str) -> Option<NaiveDateTime> {
    for fmt in YEAR_FIRST_DATETIME {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Some(dt) = parse_with(s, &YEAR_FIRST_DATE) {
        return Some(dt);
    }

    // "YYYY-MM" and "YYYY": pin the missing parts to the first day.
    if s.len() == 7 {
        return parse_with(&format!("{s}-01"), &YEAR_FIRST_DATE);
    }
    if s.len() == 4 {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0);
    }
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        return parse_compact(s);
    }
    None
}

fn parse_month_first(s: &str) -> Option<NaiveDateTime> {
    // Month-year first: "%B %d %Y" would read "June 2005" as June 20, year 5.
    parse_with(&format!("1 {s}"), &MONTH_YEAR_DATE)
        .or_else(|| parse_with(s, &MONTH_FIRST_DATE))
        .or_else(|| parse_with(s, &DAY_FIRST_DATE))
}

/// `YYYYMMDD`.
fn parse_compact(s: &str) -> Option<NaiveDateTime> {
    let year: i32 = s.get(..4)?.parse().ok()?;
    let month: u32 = s.get(4..6)?.parse().ok()?;
    let day: u32 = s.get(6..)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Parse with the first matching layout whose year came from four input digits.
fn parse_with(s: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .find(|d| has_four_digit_year(s, d.year()))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Returns `true` if `year` appears in `s` as a run of exactly four digits.
fn has_four_digit_year(s: &str, year: i32) -> bool {
    let year = format!("{year:04}");
    s.split(|c: char| !c.is_ascii_digit())
        .any(|run| run.len() == 4 && run == year)
}

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// An open date window `(lower, upper)`: both bounds are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// Exclusive lower bound.
    pub lower: NaiveDateTime,
    /// Exclusive upper bound.
    pub upper: NaiveDateTime,
}

/// Errors building a [`DateRange`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateRangeError {
    /// A bound did not match any known date layout.
    #[error("invalid {which} date bound: {value:?}")]
    InvalidBound {
        /// `"lower"` or `"upper"`.
        which: &'static str,
        /// The offending input.
        value: String,
    },

    /// Only one of the two bounds was given.
    #[error("date range needs both bounds; {which} bound missing")]
    MissingBound {
        /// `"lower"` or `"upper"`.
        which: &'static str,
    },
}

impl DateRange {
    /// Build a range from two parsed bounds.
    #[must_use]
    pub const fn new(lower: NaiveDateTime, upper: NaiveDateTime) -> Self {
        Self { lower, upper }
    }

    /// Parse both bounds with the lenient layout list.
    ///
    /// Unlike record dates, a bad bound is never replaced by the sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::InvalidBound`] if either bound is unparseable.
    pub fn parse(lower: &str, upper: &str) -> Result<Self, DateRangeError> {
        let lo = parse_date(lower).ok_or_else(|| DateRangeError::InvalidBound {
            which: "lower",
            value: lower.to_string(),
        })?;
        let hi = parse_date(upper).ok_or_else(|| DateRangeError::InvalidBound {
            which: "upper",
            value: upper.to_string(),
        })?;
        Ok(Self::new(lo, hi))
    }

    /// Returns `true` if `lower < date < upper`.
    #[must_use]
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        date > self.lower && date < self.upper
    }

    /// Returns `true` if no date can fall inside the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower >= self.upper
    }
}

/// Returns `true` if the record's date falls inside `range`.
///
/// With no range every record passes. Unparseable record dates are
/// compared as the sentinel date.
#[must_use]
pub fn in_range(record: &Record, range: Option<&DateRange>) -> bool {
    range.is_none_or(|r| r.contains(parse_date_or_default(&record.creation_date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;
    use chrono::Timelike;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
    }

    fn dated(date: &str) -> Record {
        Record {
            recid: RecordId::Int(1),
            title: "t".to_string(),
            authors: vec!["A".to_string()],
            co_authors: vec![],
            citations: vec![RecordId::Int(2)],
            references: vec![RecordId::Int(3)],
            creation_date: date.to_string(),
        }
    }

    #[test]
    fn garbage_yields_sentinel() {
        assert_eq!(parse_date_or_default("not-a-date"), ymd(1900, 1, 1));
        assert_eq!(parse_date_or_default(""), ymd(1900, 1, 1));
    }

    #[test]
    fn impossible_date_yields_sentinel() {
        assert_eq!(parse_date_or_default("02-31-1999"), sentinel_date());
    }

    #[test]
    fn iso_date() {
        assert_eq!(parse_date_or_default("2020-05-01"), ymd(2020, 5, 1));
    }

    #[test]
    fn timestamps_keep_time_of_day() {
        let dt = parse_date_or_default("2013-11-04T10:22:07");
        assert_eq!(dt.date(), ymd(2013, 11, 4).date());
        assert_eq!(dt.hour(), 10);

        let dt = parse_date_or_default("2013-11-04T10:22:07+02:00");
        assert_eq!(dt.hour(), 10);

        let dt = parse_date_or_default("2013-11-04 10:22:07.125");
        assert_eq!(dt.second(), 7);
    }

    #[test]
    fn month_first_and_named_months() {
        assert_eq!(parse_date_or_default("01-02-2000"), ymd(2000, 1, 2));
        assert_eq!(parse_date_or_default("12/31/1999"), ymd(1999, 12, 31));
        assert_eq!(parse_date_or_default("15 June 2005"), ymd(2005, 6, 15));
        assert_eq!(parse_date_or_default("Jun 15, 2005"), ymd(2005, 6, 15));
    }

    #[test]
    fn month_year_pins_to_first_day() {
        assert_eq!(parse_date_or_default("June 2005"), ymd(2005, 6, 1));
        assert_eq!(parse_date_or_default("Jun 2005"), ymd(2005, 6, 1));
        assert_eq!(parse_date_or_default("March 2010"), ymd(2010, 3, 1));
        assert_eq!(parse_date_or_default("June 1999"), ymd(1999, 6, 1));
    }

    #[test]
    fn two_digit_year_yields_sentinel() {
        assert_eq!(parse_date_or_default("15 June 05"), sentinel_date());
        assert_eq!(parse_date_or_default("06-15-05"), sentinel_date());
    }

    #[test]
    fn day_first_when_month_first_impossible() {
        assert_eq!(parse_date_or_default("15-06-2005"), ymd(2005, 6, 15));
        assert_eq!(parse_date_or_default("31/12/1999"), ymd(1999, 12, 31));
        // Both readings valid: month-first wins.
        assert_eq!(parse_date_or_default("03-04-2005"), ymd(2005, 3, 4));
    }

    #[test]
    fn compact_date() {
        assert_eq!(parse_date_or_default("20050615"), ymd(2005, 6, 15));
        assert_eq!(parse_date_or_default("20051340"), sentinel_date());
    }

    #[test]
    fn partial_dates_pin_to_first_day() {
        assert_eq!(parse_date_or_default("2007-03"), ymd(2007, 3, 1));
        assert_eq!(parse_date_or_default("1998"), ymd(1998, 1, 1));
        assert_eq!(parse_date_or_default("  1998 "), ymd(1998, 1, 1));
    }

    #[test]
    fn range_bounds_are_exclusive() {
        let range = DateRange::parse("2000-01-01", "2010-01-01").expect("range");
        assert!(in_range(&dated("2005-06-15"), Some(&range)));
        assert!(!in_range(&dated("2000-01-01"), Some(&range)));
        assert!(!in_range(&dated("2010-01-01"), Some(&range)));
        assert!(!in_range(&dated("2011-01-01"), Some(&range)));
    }

    #[test]
    fn no_range_admits_everything() {
        assert!(in_range(&dated("garbage"), None));
    }

    #[test]
    fn malformed_record_date_compared_as_sentinel() {
        let range = DateRange::parse("1899-01-01", "1901-01-01").expect("range");
        assert!(in_range(&dated("garbage"), Some(&range)));
    }

    #[test]
    fn bad_bound_is_error() {
        let err = DateRange::parse("2000-01-01", "soon").expect_err("bad upper");
        assert_eq!(
            err,
            DateRangeError::InvalidBound {
                which: "upper",
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = DateRange::parse("2010-01-01", "2000-01-01").expect("range");
        assert!(range.is_empty());
        assert!(!in_range(&dated("2005-01-01"), Some(&range)));
    }

    proptest! {
        #[test]
        fn parse_never_panics(s in ".{0,40}") {
            let dt = parse_date_or_default(&s);
            prop_assert!(parse_date(&s).is_some() || dt == sentinel_date());
        }

        #[test]
        fn month_year_keeps_four_digit_year(year in 1000i32..2100, month in 0usize..12) {
            const MONTHS: [&str; 12] = [
                "January", "February", "March", "April", "May", "June",
                "July", "August", "September", "October", "November", "December",
            ];
            let dt = parse_date_or_default(&format!("{} {year}", MONTHS[month]));
            prop_assert_eq!(dt.year(), year);
        }
    }
}
