mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "laone")]
#[command(about = "Merge LaOne catalog exports and publish them to Google Sheets")]
struct Cli {
    /// Assortment export (overrides LAONE_ASSORTMENT_PATH)
    #[arg(long, global = true)]
    assortment: Option<PathBuf>,

    /// Stocks export (overrides LAONE_STOCKS_PATH)
    #[arg(long, global = true)]
    stocks: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Merge both exports and dump the catalog as JSON for inspection
    Merge {
        /// Output file (defaults to LAONE_REFINED_PATH)
        #[arg(long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the catalog to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Merge both exports and publish them into a new spreadsheet
    Publish {
        /// Spreadsheet title (overrides LAONE_SPREADSHEET_TITLE)
        #[arg(long)]
        title: Option<String>,

        /// Print the planned tabs without calling the Sheets API
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Also loads `.env`.
    let mut config = laone_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = cli.assortment {
        config.assortment_path = path;
    }
    if let Some(path) = cli.stocks {
        config.stocks_path = path;
    }
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Merge { output, stdout } => {
            commands::run_merge(&config, output.as_deref(), stdout)?;
        }
        Commands::Publish { title, dry_run } => {
            commands::run_publish(&config, title.as_deref(), dry_run).await?;
        }
    }

    Ok(())
}
