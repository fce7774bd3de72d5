//! mflow - media submission flow
//!
//! CLI binary that picks media files, reserves upload slots for them and
//! reports where each file should go.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

mod cli;

#[derive(Parser)]
#[command(name = "mflow")]
#[command(about = "Reserve upload slots for a batch of media")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick files and reserve one upload slot per file
    Submit {
        /// Image or video files, in posting order
        files: Vec<PathBuf>,

        /// Dry run - show what would be reserved without contacting the service
        #[arg(long)]
        dry_run: bool,

        /// Reservation service base URL
        #[arg(long)]
        endpoint: Option<Url>,

        /// Account to reserve slots for
        #[arg(long)]
        account: Option<String>,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Check that a token is available
    Test,
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            files,
            dry_run,
            endpoint,
            account,
        } => {
            let config = cli::load_config(cli.config.as_deref(), endpoint, account)?;
            cli::run_submit(&config, files, dry_run).await?;
        }
        Commands::Auth { action } => match action {
            AuthAction::Test => cli::run_auth_test()?,
            AuthAction::Setup => cli::run_auth_setup(),
        },
        Commands::Config => {
            let config = cli::load_config(cli.config.as_deref(), None, None)?;
            cli::run_config(&config)?;
        }
    }

    Ok(())
}
