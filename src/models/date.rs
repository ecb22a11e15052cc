use std::fmt;

use serde::{Serialize, Serializer};

/// How much of a date a metadata value pins down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

/// A normalized metadata date at year, month, or day precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    /// A bare year, e.g. `1993`
    Year(i32),
    /// Year and month, e.g. `1993-09`
    YearMonth(i32, u32),
    /// Year, month and day, e.g. `1993-05-12`
    FullDate(i32, u32, u32),
}

impl DateValue {
    pub fn year(&self) -> i32 {
        match *self {
            DateValue::Year(y) | DateValue::YearMonth(y, _) | DateValue::FullDate(y, _, _) => y,
        }
    }

    pub fn month(&self) -> Option<u32> {
        match *self {
            DateValue::Year(_) => None,
            DateValue::YearMonth(_, m) | DateValue::FullDate(_, m, _) => Some(m),
        }
    }

    pub fn day(&self) -> Option<u32> {
        match *self {
            DateValue::FullDate(_, _, d) => Some(d),
            _ => None,
        }
    }

    pub fn precision(&self) -> DatePrecision {
        match self {
            DateValue::Year(_) => DatePrecision::Year,
            DateValue::YearMonth(..) => DatePrecision::Month,
            DateValue::FullDate(..) => DatePrecision::Day,
        }
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DateValue::Year(y) => write!(f, "{:04}", y),
            DateValue::YearMonth(y, m) => write!(f, "{:04}-{:02}", y, m),
            DateValue::FullDate(y, m, d) => write!(f, "{:04}-{:02}-{:02}", y, m, d),
        }
    }
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
