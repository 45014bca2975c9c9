//! Error taxonomy shared by every cardledger crate.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Missing or invalid command-line input (directories, files).
    #[error("{0}")]
    Argument(String),

    /// A category file was supplied but could not be read or decoded.
    #[error("category file {}: {reason}", path.display())]
    CategoryFile { path: PathBuf, reason: String },

    #[error("invalid amount '{text}': {reason}")]
    AmountParse { text: String, reason: String },

    #[error("invalid date '{text}': {reason}")]
    DateParse { text: String, reason: String },

    /// The statement file name carries no usable `YYYY-MM` period.
    #[error("statement file name '{name}' does not contain a YYYY-MM period")]
    FilenameFormat { name: String },

    #[error("failed to extract {}: {reason}", path.display())]
    Extraction { path: PathBuf, reason: String },

    /// Nothing was extracted, so there is no date range to name the output after.
    #[error("no transactions were extracted from any statement")]
    EmptyLedger,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// Errors caused by a single malformed row, as opposed to a whole file or the run.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            LedgerError::AmountParse { .. } | LedgerError::DateParse { .. }
        )
    }
}
