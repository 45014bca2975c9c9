//! cardledger-core: transaction types, amount and date normalisation, and the
//! merged ledger.

pub mod amount;
pub mod dates;
pub mod error;
pub mod ledger;
pub mod transaction;

pub use amount::{format_amount, parse_amount};
pub use dates::{MONTH_ABBREVIATIONS, StatementPeriod, month_from_abbrev, starts_with_month};
pub use error::{LedgerError, Result};
pub use ledger::{DateRange, Ledger};
pub use transaction::Transaction;
