//! Etymograph CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "etymograph")]
#[command(about = "Word-origin chains as timelines and diagrams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./etymograph.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Local checkout of the data repository, searched before GitHub
    #[arg(long, global = true)]
    local_root: Option<PathBuf>,

    /// Never query GitHub
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the JSON API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7890")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },
    /// Print the flattened chain and timeline of a word
    Show {
        term: String,
    },
    /// Print the diagram projection of a word as JSON
    Graph {
        term: String,
    },
    /// Check every record in the local checkout
    Validate,
    /// List the words in the local checkout
    List,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout stays clean for command output
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("etymograph={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Etymograph v{}", env!("CARGO_PKG_VERSION"));

    if let Commands::Version = cli.command {
        println!("Etymograph v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = commands::load_config(cli.config.as_deref(), cli.local_root, cli.offline)?;

    match cli.command {
        Commands::Serve { port, host, open } => {
            commands::serve(config, host, port, open).await
        }
        Commands::Show { term } => {
            commands::show(config, &term).await
        }
        Commands::Graph { term } => {
            commands::graph(config, &term).await
        }
        Commands::Validate => {
            commands::validate(config)
        }
        Commands::List => {
            commands::list(config)
        }
        Commands::Version => Ok(()),
    }
}
