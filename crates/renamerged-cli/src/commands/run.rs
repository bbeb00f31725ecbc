//! Run command - rename and optionally merge every invoice in a folder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use renamerged_core::naming::LONG_FILENAME_THRESHOLD;
use renamerged_core::{
    BatchProcessor, BatchStats, CancellationFlag, ProcessingMode, ProcessingStage, ProgressSink,
    check_long_filenames,
};

use super::{filename_builder, load_config};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Folder with invoice PDFs
    #[arg(required = true)]
    input_dir: PathBuf,

    /// Output folder
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Processing mode (default: from settings)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Maximum filename length, extension included
    #[arg(long)]
    max_length: Option<usize>,

    /// Stop instead of shortening when long filenames are detected
    #[arg(long)]
    strict_length: bool,

    /// Also write summary.csv to the output folder
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Copy each PDF under its generated name
    Rename,
    /// Also merge the invoices of each partner
    Merge,
}

impl From<ModeArg> for ProcessingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Rename => ProcessingMode::Rename,
            ModeArg::Merge => ProcessingMode::RenameAndMerge,
        }
    }
}

/// One row of summary.csv.
#[derive(Serialize)]
struct SummaryRow {
    input_dir: String,
    output_dir: String,
    mode: String,
    total: usize,
    renamed: usize,
    merged: usize,
    errors: usize,
    cancelled: bool,
    processing_time_ms: u64,
}

/// Progress bars for the three stages of a run.
struct BarSink {
    multi: MultiProgress,
    reading: ProgressBar,
    processing: ProgressBar,
    finalizing: ProgressBar,
}

impl BarSink {
    fn new(mode: ProcessingMode) -> Self {
        let multi = MultiProgress::new();
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:>10} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-");

        let add = |stage: ProcessingStage| {
            let bar = multi.add(ProgressBar::new(0));
            bar.set_style(style.clone());
            bar.set_prefix(stage.label());
            bar
        };

        let reading = add(ProcessingStage::Reading);
        let processing = if mode == ProcessingMode::RenameAndMerge {
            add(ProcessingStage::Processing)
        } else {
            ProgressBar::hidden()
        };
        let finalizing = add(ProcessingStage::Finalizing);

        Self {
            multi,
            reading,
            processing,
            finalizing,
        }
    }

    fn bar(&self, stage: ProcessingStage) -> &ProgressBar {
        match stage {
            ProcessingStage::Reading => &self.reading,
            ProcessingStage::Processing => &self.processing,
            ProcessingStage::Finalizing => &self.finalizing,
        }
    }

    fn finish(&self) {
        for bar in [&self.reading, &self.processing, &self.finalizing] {
            bar.finish_with_message("done");
        }
    }
}

impl ProgressSink for BarSink {
    fn progress(&self, stage: ProcessingStage, current: usize, total: usize) {
        let bar = self.bar(stage);
        bar.set_length(total as u64);
        bar.set_position(current as u64);
    }

    fn log(&self, message: &str) {
        let _ = self.multi.println(message);
    }
}

pub async fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let mode = args.mode.map(ProcessingMode::from).unwrap_or(config.mode);
    let mut builder = filename_builder(&config, args.max_length)?;

    if !args.input_dir.is_dir() {
        anyhow::bail!("Input folder not found: {}", args.input_dir.display());
    }

    let report = check_long_filenames(&args.input_dir, &builder)?;
    if report.has_long_filenames() {
        println!(
            "{} {} file(s) would get names longer than {} characters",
            style("⚠").yellow(),
            report.long_filenames.len(),
            LONG_FILENAME_THRESHOLD
        );
        for long in &report.long_filenames {
            println!("  - {} ({} chars)", long.sample.original_file, long.sample.length);
        }

        if args.strict_length {
            anyhow::bail!("Long filenames detected; rerun without --strict-length to shorten them");
        }
        if let Some(budget) = long_name_budget(args.max_length, config.max_filename_length) {
            builder = filename_builder(&config, Some(budget))?;
            warn!("Shortening filenames to {} characters", budget);
        }
    }

    fs::create_dir_all(&args.output_dir)?;
    println!(
        "{} Mode: {}, max filename length: {}",
        style("ℹ").blue(),
        mode,
        builder.settings().budget()
    );

    let cancellation = CancellationFlag::new();
    let ctrl_c = {
        let flag = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Cancelling after the current file");
                flag.cancel();
            }
        })
    };

    let processor = BatchProcessor::new(builder, mode).with_cancellation(cancellation);
    let input_dir = args.input_dir.clone();
    let output_dir = args.output_dir.clone();
    let stats = tokio::task::spawn_blocking(move || {
        let sink = BarSink::new(mode);
        let result = processor.run(&input_dir, &output_dir, &sink);
        sink.finish();
        result
    })
    .await??;
    ctrl_c.abort();

    info!("Batch finished: {:?}", stats);

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &args, mode, &stats, start.elapsed().as_millis() as u64)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    print_stats(&stats, start);
    Ok(())
}

/// Budget applied after long names are found; an explicit length from the
/// command line or the settings file is left alone.
fn long_name_budget(cli_max: Option<usize>, saved_max: Option<usize>) -> Option<usize> {
    match (cli_max, saved_max) {
        (None, None) => Some(LONG_FILENAME_THRESHOLD),
        _ => None,
    }
}

fn print_stats(stats: &BatchStats, start: Instant) {
    println!();
    if stats.cancelled {
        println!("{} Cancelled after {:?}", style("✗").yellow(), start.elapsed());
    } else {
        println!(
            "{} Processed {} files in {:?}",
            style("✓").green(),
            stats.total,
            start.elapsed()
        );
    }
    println!(
        "   {} renamed, {} merged, {} errors",
        style(stats.renamed).green(),
        style(stats.merged).cyan(),
        style(stats.errors).red()
    );
}

fn write_summary(
    path: &Path,
    args: &RunArgs,
    mode: ProcessingMode,
    stats: &BatchStats,
    processing_time_ms: u64,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.serialize(SummaryRow {
        input_dir: args.input_dir.display().to_string(),
        output_dir: args.output_dir.display().to_string(),
        mode: mode.to_string(),
        total: stats.total,
        renamed: stats.renamed,
        merged: stats.merged,
        errors: stats.errors,
        cancelled: stats.cancelled,
        processing_time_ms,
    })?;
    wtr.flush()?;
    Ok(())
}
