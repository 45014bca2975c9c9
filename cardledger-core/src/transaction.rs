//! Cleaned transaction records.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One statement line with both dates resolved to full calendar dates.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_date: NaiveDate,
    pub posting_date: NaiveDate,
    pub activity: String,
    /// CAD. Negative = payment/credit, positive = purchase/debit.
    pub amount: Decimal,
    /// Set only when a category rule set was applied and one of its patterns matched.
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(
        transaction_date: NaiveDate,
        posting_date: NaiveDate,
        activity: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            transaction_date,
            posting_date,
            activity: activity.into(),
            amount,
            category: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }
}
