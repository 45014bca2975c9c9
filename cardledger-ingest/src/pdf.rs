//! Statement PDFs read through `pdf_oxide`'s positioned text spans.

use anyhow::Result;
use cardledger_core::LedgerError;
use pdf_oxide::PdfDocument;
use std::path::Path;
use tracing::{debug, warn};

use crate::layout::{TableLayout, TextFragment, assemble_lines};
use crate::parsers::rbc_visa::select_transaction_rows;
use crate::types::RawRow;
use crate::RowExtractor;

/// Cuts transaction rows out of every page of a statement using a fixed
/// [`TableLayout`].
#[derive(Debug, Clone, Default)]
pub struct PdfTableExtractor {
    layout: TableLayout,
}

impl PdfTableExtractor {
    pub fn new(layout: TableLayout) -> Self {
        Self { layout }
    }

    /// Positioned text for each page, in page order. A page that fails to
    /// decode contributes no fragments.
    pub fn read_pages(&self, path: &Path) -> Result<Vec<Vec<TextFragment>>> {
        let unreadable = |e: pdf_oxide::Error| LedgerError::Extraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let mut doc = PdfDocument::open(path).map_err(unreadable)?;
        let page_count = doc.page_count().map_err(unreadable)?;

        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            match doc.extract_spans(index) {
                Ok(spans) => {
                    let fragments: Vec<TextFragment> = spans
                        .into_iter()
                        .map(|span| {
                            TextFragment::new(
                                span.text,
                                span.bbox.x,
                                self.layout.page_height - span.bbox.y,
                                span.bbox.width,
                            )
                        })
                        .collect();
                    debug!(page = index + 1, fragments = fragments.len(), "read page");
                    pages.push(fragments);
                }
                Err(e) => {
                    warn!(
                        file = %path.display(),
                        page = index + 1,
                        error = %e,
                        "skipping unreadable page"
                    );
                    pages.push(Vec::new());
                }
            }
        }
        Ok(pages)
    }
}

impl RowExtractor for PdfTableExtractor {
    fn extract_rows(&self, path: &Path) -> Result<Vec<RawRow>> {
        let lines: Vec<Vec<String>> = self
            .read_pages(path)?
            .iter()
            .flat_map(|page| assemble_lines(page, &self.layout))
            .collect();
        Ok(select_transaction_rows(lines))
    }
}
