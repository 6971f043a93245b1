//! Maquette CLI - lightweight website builder backend.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "maquette")]
#[command(about = "Lightweight website builder backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to maquette.toml config file
    #[arg(short, long, default_value = "maquette.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the directory tree and seed content
    Setup {
        /// Overwrite seed files that already exist
        #[arg(short, long)]
        force: bool,
    },

    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Setup { force } => {
            commands::setup::run(std::path::Path::new("."), force).await?;
        }
        Commands::Serve { port } => {
            commands::serve::run(&cli.config, port).await?;
        }
    }

    Ok(())
}
