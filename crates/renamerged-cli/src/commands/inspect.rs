//! Inspect command - show what a single invoice would be renamed to.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use renamerged_core::{ExtractedMetadata, FakturParser, PdfExtractor};

use super::{file_name, filename_builder, load_config};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Invoice PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Override the filename length budget
    #[arg(long)]
    max_length: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct InspectReport {
    file: String,
    metadata: ExtractedMetadata,
    filename: String,
    untruncated: String,
    truncated: bool,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let builder = filename_builder(&config, args.max_length)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if !PdfExtractor::validate_file(&args.input) {
        anyhow::bail!("Not a readable PDF: {}", args.input.display());
    }

    info!("Inspecting file: {}", args.input.display());
    let metadata = FakturParser::new().parse_file(&args.input)?;

    let filename = builder.build(&metadata);
    let untruncated = builder.untruncated(&metadata);
    let report = InspectReport {
        file: file_name(&args.input),
        truncated: filename != untruncated,
        metadata,
        filename,
        untruncated,
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", format_text(&report)),
    }

    Ok(())
}

fn format_text(report: &InspectReport) -> String {
    let metadata = &report.metadata;
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", report.file));
    output.push('\n');

    output.push_str(&format!("Seller ID:      {}\n", metadata.seller_id_or_sentinel()));
    output.push_str(&format!("Partner:        {}\n", metadata.partner_name_or_sentinel()));
    output.push_str(&format!("Invoice number: {}\n", metadata.invoice_number_or_sentinel()));
    output.push_str(&format!("Date:           {}\n", metadata.date_or_sentinel()));
    if metadata.has_reference() {
        output.push_str(&format!("Reference:      {}\n", metadata.reference));
    }
    output.push('\n');

    output.push_str(&format!(
        "Filename: {} ({} chars)\n",
        report.filename,
        report.filename.chars().count()
    ));
    if report.truncated {
        output.push_str(&format!(
            "Shortened from: {} ({} chars)\n",
            report.untruncated,
            report.untruncated.chars().count()
        ));
    }

    output
}
