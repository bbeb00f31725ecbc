//! Check command - look for invoices whose names would be shortened.

use std::path::PathBuf;

use clap::Args;
use console::style;

use renamerged_core::check_long_filenames;
use renamerged_core::naming::LONG_FILENAME_THRESHOLD;

use super::{filename_builder, load_config};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Folder with invoice PDFs
    #[arg(required = true)]
    input_dir: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: CheckArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let builder = filename_builder(&config, None)?;

    let report = check_long_filenames(&args.input_dir, &builder)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.samples.is_empty() {
        println!(
            "{} No invoices with a partner name found in {}",
            style("ℹ").blue(),
            args.input_dir.display()
        );
        return Ok(());
    }

    println!("Sample filenames:");
    for sample in &report.samples {
        println!(
            "  {} -> {} ({} chars)",
            sample.original_file, sample.generated_filename, sample.length
        );
    }
    println!();

    if report.has_long_filenames() {
        println!(
            "{} {} file(s) exceed {} characters:",
            style("⚠").yellow(),
            report.long_filenames.len(),
            LONG_FILENAME_THRESHOLD
        );
        for long in &report.long_filenames {
            println!(
                "  - {} ({} chars, partner {}, reference {:?})",
                long.sample.original_file, long.sample.length, long.partner_name, long.reference
            );
        }
        println!();
        println!(
            "Use 'renamerged run --max-length N' to choose a limit, or --strict-length to stop."
        );
    } else {
        println!(
            "{} No filenames longer than {} characters",
            style("✓").green(),
            LONG_FILENAME_THRESHOLD
        );
    }

    Ok(())
}
