//! Batch driver: statements directory → ledger CSV.
//!
//! Each statement is extracted independently into its own transaction list.
//! A statement that cannot be named, opened or read is logged and contributes
//! nothing; the run only fails on bad inputs, on a malformed row under the
//! strict row policy, or when no transaction survives at all.

use anyhow::{Context, Result};
use cardledger_core::{DateRange, Ledger, LedgerError, Transaction};
use cardledger_ingest::{RowExtractor, RowPolicy, StatementFile, to_transactions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::category_rules::CategoryRuleSet;
use crate::csv_export::write_ledger_file;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub source_dir: PathBuf,
    pub results_dir: PathBuf,
    pub category_file: Option<PathBuf>,
    pub row_policy: RowPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementOutcome {
    Extracted(usize),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSummary {
    pub file_name: String,
    pub outcome: StatementOutcome,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub output_path: PathBuf,
    pub statements: Vec<StatementSummary>,
    pub transactions: usize,
    pub date_range: DateRange,
    pub categorized: Option<usize>,
}

/// Check directories and the optional category file before doing any work.
pub fn validate(options: &PipelineOptions) -> Result<(), LedgerError> {
    if !options.source_dir.is_dir() {
        return Err(LedgerError::Argument(format!(
            "source directory {} is not a directory",
            options.source_dir.display()
        )));
    }
    if !options.results_dir.is_dir() {
        return Err(LedgerError::Argument(format!(
            "results directory {} is not a directory",
            options.results_dir.display()
        )));
    }
    if let Some(path) = &options.category_file {
        if !path.is_file() {
            return Err(LedgerError::Argument(format!(
                "category file {} is not a file",
                path.display()
            )));
        }
    }
    Ok(())
}

/// `.pdf` files directly inside `dir`, sorted by file name.
pub fn discover_statements(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "ignoring non-statement entry");
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Extract one statement. Row-level failures follow `policy`; anything
/// else is returned for the caller to log.
pub fn extract_statement(
    extractor: &dyn RowExtractor,
    path: &Path,
    policy: RowPolicy,
) -> Result<Vec<Transaction>> {
    let statement = StatementFile::from_path(path)?;
    let rows = extractor.extract_rows(&statement.path)?;
    debug!(
        file = %statement.file_name(),
        period = %statement.period,
        rows = rows.len(),
        "extracted rows"
    );
    Ok(to_transactions(&statement, &rows, policy)?)
}

pub fn run(options: &PipelineOptions, extractor: &dyn RowExtractor) -> Result<PipelineReport> {
    validate(options)?;

    let rules = options
        .category_file
        .as_deref()
        .map(CategoryRuleSet::load)
        .transpose()?;

    let paths = discover_statements(&options.source_dir)?;
    info!(count = paths.len(), dir = %options.source_dir.display(), "found statements");

    let mut per_statement = Vec::with_capacity(paths.len());
    let mut statements = Vec::with_capacity(paths.len());
    for path in &paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match extract_statement(extractor, path, options.row_policy) {
            Ok(txns) => {
                info!(file = %file_name, transactions = txns.len(), "statement parsed");
                statements.push(StatementSummary {
                    file_name,
                    outcome: StatementOutcome::Extracted(txns.len()),
                });
                per_statement.push(txns);
            }
            Err(e) if is_fatal(&e, options.row_policy) => {
                return Err(e.context(format!("processing {file_name}")));
            }
            Err(e) => {
                warn!(file = %file_name, error = %format!("{e:#}"), "skipping statement");
                statements.push(StatementSummary {
                    file_name,
                    outcome: StatementOutcome::Skipped(format!("{e:#}")),
                });
            }
        }
    }

    let ledger = Ledger::merge(per_statement);
    let date_range = ledger.date_range()?;

    let ledger = match &rules {
        Some(rules) => rules.apply(ledger),
        None => ledger,
    };
    let categorized = rules
        .as_ref()
        .map(|_| ledger.iter().filter(|t| t.category.is_some()).count());

    let output_path = write_ledger_file(&options.results_dir, &ledger, categorized.is_some())?;
    info!(path = %output_path.display(), transactions = ledger.len(), "ledger written");

    Ok(PipelineReport {
        output_path,
        statements,
        transactions: ledger.len(),
        date_range,
        categorized,
    })
}

fn is_fatal(err: &anyhow::Error, policy: RowPolicy) -> bool {
    policy == RowPolicy::Strict
        && err
            .downcast_ref::<LedgerError>()
            .is_some_and(LedgerError::is_row_error)
}
