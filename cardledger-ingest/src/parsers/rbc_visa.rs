//! RBC Visa statements.
//!
//! The transaction table has five layout cells per line:
//!   (margin)  TRANS DATE  POSTING DATE  ACTIVITY DESCRIPTION          AMOUNT
//!             JAN 15      JAN 16        COFFEE SHOP #12 TORONTO ON    $4.50
//!             JAN 20      JAN 21        PAYMENT - THANK YOU           -$250.00
//!
//! The margin cell is discarded. Lines with any empty cell, or whose first
//! date does not open with a month abbreviation, are headers, totals or
//! wrapped text and are dropped.

use cardledger_core::{LedgerError, StatementPeriod, Transaction, parse_amount, starts_with_month};
use tracing::warn;

use crate::types::{RawRow, RowPolicy, StatementFile};

/// Keep only the lines that are transactions, in their original order.
pub fn select_transaction_rows<I>(lines: I) -> Vec<RawRow>
where
    I: IntoIterator<Item = Vec<String>>,
{
    lines.into_iter().filter_map(raw_row_from_cells).collect()
}

fn raw_row_from_cells(cells: Vec<String>) -> Option<RawRow> {
    let mut it = cells.into_iter().skip(1).map(|c| c.trim().to_string());
    let row = RawRow {
        transaction_date: it.next()?,
        posting_date: it.next()?,
        activity: it.next()?,
        amount: it.next()?,
    };

    let complete = !row.transaction_date.is_empty()
        && !row.posting_date.is_empty()
        && !row.activity.is_empty()
        && !row.amount.is_empty();

    (complete && starts_with_month(&row.transaction_date)).then_some(row)
}

/// Resolve one raw row against its statement period.
pub fn to_transaction(row: &RawRow, period: StatementPeriod) -> Result<Transaction, LedgerError> {
    let transaction_date = period.resolve(&row.transaction_date)?;
    let posting_date = period.resolve(&row.posting_date)?;
    let amount = parse_amount(&row.amount)?;
    Ok(Transaction::new(
        transaction_date,
        posting_date,
        row.activity.clone(),
        amount,
    ))
}

/// Convert a statement's rows. Under [`RowPolicy::Skip`] a malformed row is
/// logged and dropped; under [`RowPolicy::Strict`] the first one is returned
/// as the error.
pub fn to_transactions(
    statement: &StatementFile,
    rows: &[RawRow],
    policy: RowPolicy,
) -> Result<Vec<Transaction>, LedgerError> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match to_transaction(row, statement.period) {
            Ok(txn) => out.push(txn),
            Err(e) if policy == RowPolicy::Skip => {
                warn!(
                    file = %statement.file_name(),
                    activity = %row.activity,
                    error = %e,
                    "skipping malformed row"
                );
            }
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn line(cells: [&str; 5]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn raw(t: &str, p: &str, a: &str, amt: &str) -> RawRow {
        RawRow {
            transaction_date: t.into(),
            posting_date: p.into(),
            activity: a.into(),
            amount: amt.into(),
        }
    }

    fn statement(name: &str) -> StatementFile {
        StatementFile::from_path(name).unwrap()
    }

    #[test]
    fn test_keeps_transaction_lines_only() {
        let lines = vec![
            line(["", "TRANSACTION", "POSTING", "ACTIVITY DESCRIPTION", "AMOUNT ($)"]),
            line(["", "JAN 15", "JAN 16", "COFFEE SHOP", "$4.50"]),
            line(["", "TOTAL DUE", "", "", "$4.50"]),
            line(["", "", "", "TORONTO ON", ""]),
            line(["", "JAN 20", "JAN 21", "PAYMENT - THANK YOU", "-$250.00"]),
        ];
        let rows = select_transaction_rows(lines);
        assert_eq!(
            rows,
            vec![
                raw("JAN 15", "JAN 16", "COFFEE SHOP", "$4.50"),
                raw("JAN 20", "JAN 21", "PAYMENT - THANK YOU", "-$250.00"),
            ]
        );
    }

    #[test]
    fn test_drops_total_due_even_when_complete() {
        let rows = select_transaction_rows(vec![line(["", "TOTAL DUE", "X", "Y", "$1.00"])]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_drops_partial_rows_and_short_lines() {
        let rows = select_transaction_rows(vec![
            line(["", "FEB 01", "FEB 02", "", "$9.99"]),
            vec!["".to_string(), "FEB 01".to_string()],
        ]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_to_transaction_resolves_dates_and_amount() {
        let stmt = statement("2023-01-statement.pdf");
        let row = raw("DEC 30", "JAN 02", "GROCER", "$1,020.10");
        let txn = to_transaction(&row, stmt.period).unwrap();
        assert_eq!(txn.transaction_date, NaiveDate::from_ymd_opt(2022, 12, 30).unwrap());
        assert_eq!(txn.posting_date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(txn.amount, dec!(1020.10));
        assert_eq!(txn.category, None);
    }

    #[test]
    fn test_skip_policy_drops_bad_rows() {
        let stmt = statement("2023-03-statement.pdf");
        let rows = vec![
            raw("MAR 01", "MAR 02", "GOOD", "$1.00"),
            raw("FEB 30", "MAR 02", "BAD DATE", "$1.00"),
            raw("MAR 03", "MAR 04", "BAD AMOUNT", "$1.0.0"),
            raw("MAR 05", "MAR 06", "ALSO GOOD", "-$2.00"),
        ];
        let txns = to_transactions(&stmt, &rows, RowPolicy::Skip).unwrap();
        let names: Vec<_> = txns.iter().map(|t| t.activity.as_str()).collect();
        assert_eq!(names, ["GOOD", "ALSO GOOD"]);
    }

    #[test]
    fn test_strict_policy_fails_on_first_bad_row() {
        let stmt = statement("2023-03-statement.pdf");
        let rows = vec![
            raw("MAR 01", "MAR 02", "GOOD", "$1.00"),
            raw("MAR 03", "MAR 04", "BAD AMOUNT", "$1.0.0"),
        ];
        let err = to_transactions(&stmt, &rows, RowPolicy::Strict).unwrap_err();
        assert!(matches!(err, LedgerError::AmountParse { .. }));
    }
}
