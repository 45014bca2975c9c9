//! cardledger-finance: category tagging, CSV export and the statement pipeline.

pub mod category_rules;
pub mod csv_export;
pub mod pipeline;

pub use category_rules::CategoryRuleSet;
pub use csv_export::{output_file_name, write_ledger, write_ledger_file};
pub use pipeline::{PipelineOptions, PipelineReport, StatementOutcome, StatementSummary, run};
