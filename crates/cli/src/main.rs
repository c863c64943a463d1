//! vpcsync CLI - Main Entry Point
//!
//! Reconciles a subnet against its desired placement and keeps the
//! last-applied state in a local SQLite database.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

mod commands;
mod config;
mod output;

use commands::subnet;
use config::Config;

/// vpcsync - declarative subnet reconciler
#[derive(Parser)]
#[command(name = "vpcsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "~/.vpcsync/config.toml",
        env = "VPCSYNC_CONFIG",
        global = true
    )]
    config: PathBuf,

    /// State database path, overrides the configuration file
    #[arg(long, env = "VPCSYNC_STATE", global = true)]
    state: Option<PathBuf>,

    /// Provider API endpoint, overrides the configuration file
    #[arg(long, env = "VPCSYNC_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Subnet(subnet::SubnetCommands),

    /// Write the effective configuration to the configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = Config::load(&cli.config)?;
    if let Some(state) = cli.state {
        config.state_path = config::expand_home(&state);
    }
    if let Some(endpoint) = cli.endpoint {
        config.provider.endpoint = endpoint;
    }
    debug!("Using configuration {:?}", config);

    match cli.command {
        Commands::Subnet(cmd) => {
            info!("vpcsync v{}", vpcsync_core::VERSION);
            subnet::execute(cmd, &config, cli.format).await?
        }
        Commands::Init { force } => {
            let path = config::expand_home(&cli.config);
            if path.exists() && !force {
                anyhow::bail!("{} already exists, pass --force to overwrite", path.display());
            }
            config.save(&path)?;
            output::print_success(&format!("Wrote {}", path.display()));
        }
        Commands::Version => {
            println!("vpcsync v{}", env!("CARGO_PKG_VERSION"));
            println!("Declarative subnet reconciler");
        }
    }

    Ok(())
}
