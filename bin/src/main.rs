//! ratelog CLI - archives SBI forex reference rates as per-currency time series.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "ratelog")]
#[command(about = "Archives SBI forex reference rates as per-currency time series", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (warnings and errors only on the console)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory holding the per-currency dataset files
    #[arg(long, default_value = "csv_files", global = true)]
    data_dir: PathBuf,

    /// Persistent log file
    #[arg(long, default_value = "log.txt", global = true)]
    log_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the latest published document, archive it, and ingest it
    Fetch {
        /// Directory for the raw-document archive
        #[arg(long, default_value = "pdf_files")]
        archive_dir: PathBuf,

        /// Skip archiving the raw document
        #[arg(long)]
        no_archive: bool,
    },

    /// Ingest one local document file
    Parse {
        /// Path to the document
        file: PathBuf,
    },

    /// Re-ingest every archived document under a directory tree
    Backfill {
        /// Root of the raw-document archive
        #[arg(default_value = "pdf_files")]
        dir: PathBuf,
    },
}

/// Initializes the process-wide logging pipeline: a compact console layer
/// filtered by verbosity, plus a plain-text layer appending to the
/// persistent log file.
fn init_logging(verbose: u8, quiet: bool, log_file: &Path) -> Result<()> {
    let default_level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ratelog={default_level},{default_level}")));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    init_logging(cli.verbose, cli.quiet, &cli.log_file)?;
    let store = ratelog_store::CsvSeriesStore::new(&cli.data_dir);

    match command {
        Commands::Fetch {
            archive_dir,
            no_archive,
        } => commands::fetch::fetch(&store, &archive_dir, !no_archive).await,
        Commands::Parse { file } => commands::parse::parse(&store, &file),
        Commands::Backfill { dir } => commands::backfill::backfill(&store, &dir),
    }
}
