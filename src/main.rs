//! repomap CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "repomap")]
#[command(about = "File-level dependency graph and architecture map for repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a repository and print the graph payload as JSON
    Scan {
        /// Repository root to scan
        path: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// How many complexity hotspots to report
        #[arg(long, default_value = "5")]
        top: usize,

        /// Additional directory names to exclude
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },
    /// Summarize a single source file via an AI provider
    Summarize {
        /// Source file to summarize
        file: PathBuf,

        /// Summarizer provider name
        #[arg(long, default_value = "openai")]
        provider: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "repomap={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Scan {
            path,
            pretty,
            top,
            exclude,
        } => commands::scan(path, pretty, top, exclude),
        Commands::Summarize { file, provider } => commands::summarize(file, provider).await,
        Commands::Version => {
            println!("repomap v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
