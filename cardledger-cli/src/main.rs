use anyhow::{Context, Result, bail};
use cardledger_finance::{PipelineOptions, PipelineReport, StatementOutcome, run};
use cardledger_ingest::{PdfTableExtractor, RowPolicy};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "cardledger",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARDLEDGER_BUILD_SHA"), ")"),
    about = "Merge credit-card statement PDFs into one categorised CSV ledger"
)]
struct Cli {
    /// Directory containing the statement PDFs
    #[arg(required_unless_present = "print_config")]
    source_dir: Option<PathBuf>,

    /// Directory the CSV is written to
    #[arg(required_unless_present = "print_config")]
    results_dir: Option<PathBuf>,

    /// JSON object mapping category name to substring patterns
    category_file: Option<PathBuf>,

    /// Config file (default: ~/.cardledger/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort on the first row whose date or amount does not parse
    #[arg(long)]
    strict: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", config::render_config(&cfg)?);
        return Ok(());
    }

    let (Some(source_dir), Some(results_dir)) = (cli.source_dir, cli.results_dir) else {
        bail!("You must specify a source and a results directory");
    };

    let row_policy = if cli.strict {
        RowPolicy::Strict
    } else {
        cfg.rows.policy
    };

    let options = PipelineOptions {
        source_dir,
        results_dir,
        category_file: cli.category_file,
        row_policy,
    };

    println!("\nBeginning PDF extraction...");
    println!("Source directory: {}", options.source_dir.display());
    println!("Results directory: {}", options.results_dir.display());
    println!(
        "Category file: {}",
        options
            .category_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!("=================================");

    let extractor = PdfTableExtractor::new(cfg.layout);
    let report = run(&options, &extractor).context("Execution stopped")?;
    print_report(&report);

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_report(report: &PipelineReport) {
    for s in &report.statements {
        match &s.outcome {
            StatementOutcome::Extracted(n) => {
                println!("  {:<48} {:>4} transactions", s.file_name, n)
            }
            StatementOutcome::Skipped(reason) => {
                println!("  {:<48} skipped: {}", s.file_name, reason)
            }
        }
    }

    println!(
        "\n{} transactions from {} to {}",
        report.transactions, report.date_range.first, report.date_range.last
    );
    if let Some(n) = report.categorized {
        println!("{} categorised, {} uncategorised", n, report.transactions - n);
    }
    println!(
        "Execution successfully completed.\nFile has been saved to: {}",
        report.output_path.display()
    );
}
