//! statement-text - converts PDF account statements to CSV
//!
//! Usage:
//!   statement-text --in ./in --out ./out
//!   statement-text --markers markers.json -v

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use statement_text_rs::{
    Markers, StatementParser,
    batch::{BatchConverter, DocumentOutcome},
    pdf::PdfTextExtractor,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "statement-text", version, about = "Convert PDF bank statements to CSV")]
struct Cli {
    /// Input directory to search for PDF files
    #[arg(long = "in", default_value = "./in")]
    input: PathBuf,

    /// Output directory to save CSV files
    #[arg(long = "out", default_value = "./out")]
    output: PathBuf,

    /// JSON file overriding the noise, summary and header markers
    #[arg(long)]
    markers: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_markers(path: Option<&PathBuf>) -> Result<Markers> {
    let Some(path) = path else {
        return Ok(Markers::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read markers file {}", path.display()))?;
    Markers::from_json(&content)
        .with_context(|| format!("Failed to parse markers file {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    println!("Input directory: {}", cli.input.display());
    println!("Output directory: {}", cli.output.display());

    let markers = load_markers(cli.markers.as_ref())?;
    let converter = BatchConverter::new(PdfTextExtractor, StatementParser::new(markers));

    let report = converter
        .run(&cli.input, &cli.output)
        .with_context(|| format!("Error walking the path {}", cli.input.display()))?;

    for doc in &report.documents {
        match &doc.outcome {
            DocumentOutcome::Converted { output, records } => {
                println!("{} -> {} ({} records)", doc.input.display(), output.display(), records)
            }
            DocumentOutcome::NoRecords => println!("{}: no records found", doc.input.display()),
            DocumentOutcome::Failed(e) => println!("{}: {}", doc.input.display(), e),
        }
    }

    info!(
        converted = report.converted(),
        without_records = report.without_records(),
        failed = report.failed(),
        "batch finished"
    );
    println!(
        "\n{} converted, {} without records, {} failed",
        report.converted(),
        report.without_records(),
        report.failed()
    );

    Ok(())
}
