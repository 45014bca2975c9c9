//! Ledger: every statement's transactions merged into one list ordered by
//! transaction date.
//!
//! Each statement produces its own `Vec<Transaction>`; merging takes ownership
//! of all of them and sorts once. The sort is stable, so transactions on the
//! same day keep the order in which their statements were supplied.

use chrono::NaiveDate;

use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

/// First and last transaction dates in a non-empty ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Ledger {
    pub fn merge<I>(statements: I) -> Self
    where
        I: IntoIterator<Item = Vec<Transaction>>,
    {
        let mut transactions: Vec<Transaction> = statements.into_iter().flatten().collect();
        transactions.sort_by_key(|t| t.transaction_date);
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    /// Fails with `EmptyLedger` when there is nothing to span.
    pub fn date_range(&self) -> Result<DateRange> {
        match (self.transactions.first(), self.transactions.last()) {
            (Some(first), Some(last)) => Ok(DateRange {
                first: first.transaction_date,
                last: last.transaction_date,
            }),
            _ => Err(LedgerError::EmptyLedger),
        }
    }

    /// Replace every transaction's category with the one `assign` derives
    /// from its activity text. Order and dates are untouched.
    pub fn with_categories<F>(self, mut assign: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let transactions = self
            .transactions
            .into_iter()
            .map(|t| {
                let category = assign(&t.activity);
                t.with_category(category)
            })
            .collect();
        Self { transactions }
    }
}

impl IntoIterator for Ledger {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn txn(y: i32, m: u32, d: u32, activity: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Transaction::new(date, date, activity, dec!(1.00))
    }

    #[test]
    fn test_merge_sorts_by_transaction_date() {
        let feb = vec![txn(2023, 2, 3, "feb"), txn(2023, 1, 30, "late jan")];
        let jan = vec![txn(2022, 12, 29, "dec"), txn(2023, 1, 4, "jan")];
        let ledger = Ledger::merge(vec![feb, jan]);

        let dates: Vec<_> = ledger.iter().map(|t| t.transaction_date).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.transactions()[0].activity, "dec");
    }

    #[test]
    fn test_ties_keep_statement_order() {
        let a = vec![txn(2023, 3, 1, "first statement")];
        let b = vec![txn(2023, 3, 1, "second statement")];
        let ledger = Ledger::merge(vec![a, b]);
        let names: Vec<_> = ledger.iter().map(|t| t.activity.as_str()).collect();
        assert_eq!(names, ["first statement", "second statement"]);
    }

    #[test]
    fn test_empty_ledger_has_no_range() {
        let ledger = Ledger::merge(Vec::<Vec<Transaction>>::new());
        assert!(ledger.is_empty());
        assert!(matches!(ledger.date_range(), Err(LedgerError::EmptyLedger)));

        let only_empty_statements = Ledger::merge(vec![Vec::new(), Vec::new()]);
        assert!(matches!(only_empty_statements.date_range(), Err(LedgerError::EmptyLedger)));
    }

    #[test]
    fn test_date_range_spans_first_and_last() {
        let ledger = Ledger::merge(vec![vec![txn(2023, 5, 9, "b"), txn(2023, 1, 2, "a")]]);
        let range = ledger.date_range().unwrap();
        assert_eq!(range.first, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(range.last, NaiveDate::from_ymd_opt(2023, 5, 9).unwrap());
    }

    #[test]
    fn test_with_categories_keeps_order() {
        let ledger = Ledger::merge(vec![vec![txn(2023, 1, 2, "COFFEE"), txn(2023, 1, 1, "GAS")]]);
        let tagged = ledger.with_categories(|a| (a == "GAS").then(|| "Fuel".to_string()));
        assert_eq!(tagged.transactions()[0].category.as_deref(), Some("Fuel"));
        assert_eq!(tagged.transactions()[1].category, None);
    }
}
