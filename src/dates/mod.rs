pub mod rules;

pub use rules::*;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::models::DateValue;

/// Why a metadata date could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateErrorKind {
    #[error("unrecognized date format")]
    Unrecognized,
    #[error("date out of range for rule '{rule}'")]
    OutOfRange { rule: &'static str },
}

/// A metadata date string that no rule could turn into a date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {raw:?}")]
pub struct DateParseError {
    /// The input exactly as given
    pub raw: String,
    pub kind: DateErrorKind,
}

/// Normalize a hand-typed metadata date
///
/// The input is trimmed, then checked against [`DATE_RULES`] top to bottom.
/// The first matching rule decides; if its components do not form a real
/// date the call fails instead of trying later rules.
pub fn normalize_date(raw: &str) -> Result<DateValue, DateParseError> {
    let input = raw.trim();

    for compiled in rules() {
        let Some(caps) = compiled.regex.captures(input) else {
            continue;
        };

        let value = (compiled.rule.interpret)(&caps);
        if !in_range(&value) {
            return Err(DateParseError {
                raw: raw.to_string(),
                kind: DateErrorKind::OutOfRange {
                    rule: compiled.rule.name,
                },
            });
        }

        debug!("Date {:?} matched rule {} -> {}", raw, compiled.rule.name, value);
        return Ok(value);
    }

    Err(DateParseError {
        raw: raw.to_string(),
        kind: DateErrorKind::Unrecognized,
    })
}

/// Name of the rule that `raw` would be interpreted by, if any
pub fn matching_rule(raw: &str) -> Option<&'static str> {
    let input = raw.trim();
    rules()
        .iter()
        .find(|compiled| compiled.regex.is_match(input))
        .map(|compiled| compiled.rule.name)
}

fn in_range(value: &DateValue) -> bool {
    match *value {
        DateValue::Year(_) => true,
        DateValue::YearMonth(_, month) => (1..=12).contains(&month),
        DateValue::FullDate(year, month, day) => NaiveDate::from_ymd_opt(year, month, day).is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_month_year() {
        assert_eq!(normalize_date("12/5/93"), Ok(DateValue::FullDate(1993, 5, 12)));
        assert_eq!(normalize_date("1/1/90"), Ok(DateValue::FullDate(1990, 1, 1)));
    }

    #[test]
    fn test_year_first_matches_day_first_output() {
        // Deliberate: both spellings resolve to the same date.
        assert_eq!(normalize_date("93/5/12"), normalize_date("12/5/93"));
        assert_eq!(normalize_date("93/5/12"), Ok(DateValue::FullDate(1993, 5, 12)));
    }

    #[test]
    fn test_slash_year() {
        assert_eq!(normalize_date("/93"), Ok(DateValue::Year(1993)));
    }

    #[test]
    fn test_four_digit_year() {
        assert_eq!(normalize_date("1992"), Ok(DateValue::Year(1992)));
        assert!(normalize_date("1989").is_err());
        assert!(normalize_date("2001").is_err());
    }

    #[test]
    fn test_day_ranges_keep_first_day() {
        assert_eq!(normalize_date("19-22/7/93"), Ok(DateValue::FullDate(1993, 7, 19)));
        assert_eq!(normalize_date("3,4/11/92"), Ok(DateValue::FullDate(1992, 11, 3)));
        assert_eq!(normalize_date("3&4/11/92"), Ok(DateValue::FullDate(1992, 11, 3)));
        assert_eq!(normalize_date("3, 4, 5/11/92"), Ok(DateValue::FullDate(1992, 11, 3)));
    }

    #[test]
    fn test_month_day_range_keeps_first_day_and_month() {
        assert_eq!(normalize_date("30/6&1/7/93"), Ok(DateValue::FullDate(1993, 6, 30)));
    }

    #[test]
    fn test_month_year() {
        assert_eq!(normalize_date("9/93"), Ok(DateValue::YearMonth(1993, 9)));
        assert_eq!(normalize_date("9/93?"), Ok(DateValue::YearMonth(1993, 9)));
        assert_eq!(normalize_date("9/93?").unwrap().to_string(), "1993-09");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(normalize_date("  12/5/93\n"), Ok(DateValue::FullDate(1993, 5, 12)));
    }

    #[test]
    fn test_unrecognized_names_input() {
        let err = normalize_date("not-a-date").unwrap_err();
        assert_eq!(err.raw, "not-a-date");
        assert_eq!(err.kind, DateErrorKind::Unrecognized);
        assert!(err.to_string().contains("not-a-date"));
        assert!(err.to_string().contains("unrecognized date format"));
    }

    #[test]
    fn test_other_decades_are_rejected() {
        for raw in ["12/5/85", "12/5/2003", "/85", "9/01", "5/12/1993", ""] {
            assert_eq!(
                normalize_date(raw).map_err(|e| e.kind),
                Err(DateErrorKind::Unrecognized),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn test_impossible_dates_fail() {
        assert_eq!(
            normalize_date("31/2/93").unwrap_err().kind,
            DateErrorKind::OutOfRange { rule: "day_month_year" }
        );
        assert_eq!(
            normalize_date("13/93").unwrap_err().kind,
            DateErrorKind::OutOfRange { rule: "month_year" }
        );
        assert!(normalize_date("0/5/93").is_err());
    }

    #[test]
    fn test_matching_rule() {
        assert_eq!(matching_rule("12/5/93"), Some("day_month_year"));
        assert_eq!(matching_rule(" /97 "), Some("slash_year"));
        assert_eq!(matching_rule("sometime"), None);
    }
}
