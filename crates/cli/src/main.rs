//! Switchboard CLI — the main entry point.
//!
//! Commands:
//! - `run`       — Run a question through the scripted demo dispatcher
//! - `normalize` — Normalize a piece of text (spaces + date rewriting)
//! - `config`    — Print the default configuration TOML

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "switchboard",
    about = "Switchboard — supervisor-dispatched multi-agent conversations",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a question through the demo dispatcher with scripted agents
    Run {
        /// The originating human question
        #[arg(short, long)]
        message: Option<String>,

        /// Path to a configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Normalize text: canonicalize spaces and rewrite date tokens
    Normalize {
        /// The text to normalize
        text: String,
    },

    /// Print the default configuration TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run { message, config } => commands::run::run(message, config).await?,
        Commands::Normalize { text } => commands::normalize::run(&text),
        Commands::Config => print!("{}", switchboard_config::AppConfig::default_toml()),
    }

    Ok(())
}
