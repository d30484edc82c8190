//! LanScan CLI - Discover devices on the local network
//!
//! A command-line tool for sweeping the local /24, identifying live hosts,
//! probing common TCP ports, and exporting the results.

mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lanscan")]
#[command(author, version, about = "Discover devices and open ports on the local network")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the local subnet (default)
    Scan(ScanArgs),

    /// Show the detected local address and subnet
    Subnet,

    /// Manage scan configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Default)]
pub struct ScanArgs {
    /// Write results to CSV (defaults to the configured export path)
    #[arg(short, long, value_name = "PATH", num_args = 0..=1)]
    export: Option<Option<PathBuf>>,

    /// Maximum number of hosts probed at once
    #[arg(short, long, value_name = "N")]
    concurrency: Option<usize>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Set a configuration key
    Set { key: String, value: String },
    /// Restore the default configuration
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    // Sockets and ping children for a full /24 outgrow a 1024 soft limit.
    match lanscan_core::raise_open_file_limit() {
        Ok(limit) => tracing::debug!(limit, "open file limit"),
        Err(e) => tracing::warn!("could not raise open file limit: {}", e),
    }

    match cli.command {
        Some(Commands::Scan(args)) => {
            commands::scan::run(args, cli.json).await?;
        }
        Some(Commands::Subnet) => {
            commands::subnet::run(cli.json).await?;
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(cli.json).await?,
            ConfigAction::Set { key, value } => commands::config::set(&key, &value).await?,
            ConfigAction::Reset => commands::config::reset().await?,
        },
        None => {
            commands::scan::run(ScanArgs::default(), cli.json).await?;
        }
    }

    Ok(())
}
