//! Codeweb CLI entry point

use clap::{Parser, Subcommand};
use codeweb_indexer::ImportConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "codeweb")]
#[command(about = "Build a cross-file knowledge graph of a source tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./codeweb.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Graph snapshot to read and write
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a file or a directory tree
    Import {
        path: PathBuf,

        /// Project the imported files belong to
        #[arg(short, long)]
        project: Option<String>,

        /// Print the import report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List project names
    Projects,
    /// Print the concatenated code of a project
    Code { project: String },
    /// Delete a project and the files it contains
    Delete { project: String },
    /// Delete everything and remove the snapshot
    Clear,
    /// Show node and edge counts
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ImportConfig::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "codeweb={0},codeweb_core={0},codeweb_indexer={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Codeweb v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Store: {}", config.store_path.display());

    match cli.command {
        Commands::Import {
            path,
            project,
            json,
        } => commands::import(config, path, project, json),
        Commands::Projects => commands::projects(&config),
        Commands::Code { project } => commands::code(&config, &project),
        Commands::Delete { project } => commands::delete(&config, &project),
        Commands::Clear => commands::clear(&config),
        Commands::Stats => commands::stats(&config),
    }
}
