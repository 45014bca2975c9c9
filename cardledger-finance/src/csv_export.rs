//! Ledger → CSV.
//!
//! Columns: Transaction Date, Posting Date, Activity, Amount (CAD), and
//! Category when a rule set was applied. Dates are ISO `YYYY-MM-DD`.

use anyhow::{Context, Result};
use cardledger_core::{DateRange, Ledger};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const COLUMNS: [&str; 4] = ["Transaction Date", "Posting Date", "Activity", "Amount (CAD)"];
pub const CATEGORY_COLUMN: &str = "Category";

/// `statements_parsed_<first:YYYYMMDD>_<last:YYYYMMDD>.csv`
pub fn output_file_name(range: DateRange) -> String {
    format!(
        "statements_parsed_{}_{}.csv",
        range.first.format("%Y%m%d"),
        range.last.format("%Y%m%d")
    )
}

pub fn write_ledger<W: Write>(writer: W, ledger: &Ledger, with_category: bool) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = COLUMNS.to_vec();
    if with_category {
        header.push(CATEGORY_COLUMN);
    }
    wtr.write_record(&header)?;

    for txn in ledger {
        let mut record = vec![
            txn.transaction_date.to_string(),
            txn.posting_date.to_string(),
            txn.activity.clone(),
            txn.amount.to_string(),
        ];
        if with_category {
            record.push(txn.category.clone().unwrap_or_default());
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the ledger into `results_dir` under its date-range name.
///
/// Rows go to a temporary file in the same directory, which is renamed over
/// the final name only once everything is written. An empty ledger is an
/// `EmptyLedger` error and nothing is created.
pub fn write_ledger_file(
    results_dir: &Path,
    ledger: &Ledger,
    with_category: bool,
) -> Result<PathBuf> {
    let range = ledger.date_range()?;
    let path = results_dir.join(output_file_name(range));

    let mut tmp = NamedTempFile::new_in(results_dir)
        .with_context(|| format!("creating temporary file in {}", results_dir.display()))?;
    write_ledger(&mut tmp, ledger, with_category)
        .with_context(|| format!("writing {}", path.display()))?;
    tmp.persist(&path)
        .map_err(|e| e.error)
        .with_context(|| format!("saving {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardledger_core::{LedgerError, Transaction};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Ledger {
        Ledger::merge(vec![vec![
            Transaction::new(d(2023, 1, 15), d(2023, 1, 16), "COFFEE SHOP", dec!(4.50)),
            Transaction::new(d(2022, 12, 30), d(2023, 1, 2), "PAYMENT, THANK YOU", dec!(-1234.56))
                .with_category(Some("Payments".to_string())),
        ]])
    }

    #[test]
    fn test_output_name_uses_first_and_last_dates() {
        let range = sample().date_range().unwrap();
        assert_eq!(output_file_name(range), "statements_parsed_20221230_20230115.csv");
    }

    #[test]
    fn test_writes_base_columns() {
        let mut buf = Vec::new();
        write_ledger(&mut buf, &sample(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Transaction Date,Posting Date,Activity,Amount (CAD)\n\
             2022-12-30,2023-01-02,\"PAYMENT, THANK YOU\",-1234.56\n\
             2023-01-15,2023-01-16,COFFEE SHOP,4.50\n"
        );
    }

    #[test]
    fn test_writes_category_column_when_requested() {
        let mut buf = Vec::new();
        write_ledger(&mut buf, &sample(), true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Transaction Date,Posting Date,Activity,Amount (CAD),Category");
        assert!(lines[1].ends_with(",Payments"));
        assert!(lines[2].ends_with("4.50,"));
    }

    #[test]
    fn test_write_file_lands_under_range_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ledger_file(dir.path(), &sample(), false).unwrap();
        assert_eq!(path, dir.path().join("statements_parsed_20221230_20230115.csv"));
        assert!(path.is_file());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_empty_ledger_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_ledger_file(dir.path(), &Ledger::default(), false).unwrap_err();
        assert!(matches!(err.downcast_ref::<LedgerError>(), Some(LedgerError::EmptyLedger)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
