//! cardledger-ingest: statement discovery and table extraction.

pub mod layout;
pub mod parsers;
pub mod pdf;
pub mod types;

pub use layout::{TableLayout, TextFragment, assemble_lines};
pub use parsers::rbc_visa::{select_transaction_rows, to_transactions};
pub use pdf::PdfTableExtractor;
pub use types::{RawRow, RowPolicy, StatementFile};

use anyhow::Result;
use std::path::Path;

/// Source of raw transaction rows for one statement file, in statement order.
pub trait RowExtractor {
    fn extract_rows(&self, path: &Path) -> Result<Vec<RawRow>>;
}
