//! CLI application for renaming and merging Indonesian tax invoice PDFs.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{check, config, inspect, run};

/// Renamerged - Rename e-Faktur PDFs from their contents and merge them per partner
#[derive(Parser)]
#[command(name = "renamerged")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to settings file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the metadata and filename for a single invoice
    Inspect(inspect::InspectArgs),

    /// Look for invoices whose names would need shortening
    Check(check::CheckArgs),

    /// Rename (and optionally merge) every invoice in a folder
    Run(run::RunArgs),

    /// Manage settings
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // RUST_LOG directives refine the -v level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Inspect(args) => inspect::run(args, config_path).await,
        Commands::Check(args) => check::run(args, config_path).await,
        Commands::Run(args) => run::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
