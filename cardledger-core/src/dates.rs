//! Statement dates: rows print `MON DD` with no year, so the year comes from
//! the statement period.
//!
//! Rules:
//! - January statement: `DEC` rows belong to the previous year.
//! - December statement: `JAN` rows belong to the following year. Real
//!   statements have not been seen to produce this case; the rule is kept
//!   symmetric with the January one and is unverified.
//! - Any other statement: every row takes the statement year.
//!
//! Only the upper-case abbreviations printed on statements (`DEC`, `JAN`)
//! trigger a rollover. Mixed-case text such as `Dec 29` still parses as a
//! date but keeps the statement year.

use chrono::NaiveDate;
use std::fmt;

use crate::error::{LedgerError, Result};

/// Month abbreviations as they appear at the start of transaction rows.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// The `(year, month)` a statement was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatementPeriod {
    year: i32,
    month: u32,
}

impl StatementPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::DateParse {
                text: format!("{year:04}-{month:02}"),
                reason: "statement month must be 01-12".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Calendar year of a row dated in `row_month` on this statement.
    pub fn year_for_month(&self, row_month: u32) -> i32 {
        match (self.month, row_month) {
            (1, 12) => self.year - 1,
            (12, 1) => self.year + 1,
            _ => self.year,
        }
    }

    /// Resolve a `MON DD` row date against this period.
    pub fn resolve(&self, text: &str) -> Result<NaiveDate> {
        let (month, day, printed_case) = parse_month_day(text)?;
        let year = if printed_case {
            self.year_for_month(month)
        } else {
            self.year
        };
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| LedgerError::DateParse {
            text: format!("{} {year}", text.trim()),
            reason: "no such calendar day".to_string(),
        })
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// 1-based month number for a three-letter abbreviation (any case).
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(abbrev))
        .map(|i| i as u32 + 1)
}

/// True when `text` opens with one of the upper-case month abbreviations.
pub fn starts_with_month(text: &str) -> bool {
    MONTH_ABBREVIATIONS.iter().any(|m| text.starts_with(m))
}

/// `(month, day, whether the month was written in upper case)`
fn parse_month_day(text: &str) -> Result<(u32, u32, bool)> {
    let bad = |reason: &str| LedgerError::DateParse {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = text.trim();
    let (mon, rest) = trimmed
        .split_at_checked(3)
        .ok_or_else(|| bad("expected 'MON DD'"))?;
    let month = month_from_abbrev(mon).ok_or_else(|| bad("unknown month abbreviation"))?;
    let day: u32 = rest
        .trim()
        .parse()
        .map_err(|_| bad("day is not a number"))?;

    Ok((month, day, MONTH_ABBREVIATIONS.contains(&mon)))
}
