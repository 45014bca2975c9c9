use cardledger_core::{LedgerError, StatementPeriod};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One table row as cut out of the statement, before any cleanup.
///
/// Dates are `MON DD` with no year; the amount is the printed currency string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub transaction_date: String,
    pub posting_date: String,
    pub activity: String,
    pub amount: String,
}

/// What to do with a row whose amount or date does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Log a warning and drop the row.
    #[default]
    Skip,
    /// Abort the run.
    Strict,
}

/// A statement PDF whose file name carries the statement period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    pub path: PathBuf,
    pub period: StatementPeriod,
}

impl StatementFile {
    /// Read the period from the last `YYYY-MM` (optionally `YYYY-MM-DD`) token
    /// of the file name, e.g. `Visa Statement 2023-01-15.pdf` or
    /// `2023-01-statement.pdf`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let period = period_from_name(&name)?;
        Ok(Self {
            path: path.to_path_buf(),
            period,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn period_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^0-9])(?P<year>\d{4})-(?P<month>\d{2})(?:-\d{2})?(?:[^0-9]|$)")
            .expect("statement period regex")
    })
}

fn period_from_name(name: &str) -> Result<StatementPeriod, LedgerError> {
    let bad = || LedgerError::FilenameFormat {
        name: name.to_string(),
    };

    let caps = period_re().captures_iter(name).last().ok_or_else(bad)?;
    let year: i32 = caps["year"].parse().map_err(|_| bad())?;
    let month: u32 = caps["month"].parse().map_err(|_| bad())?;
    StatementPeriod::new(year, month).map_err(|_| bad())
}
