//! rmsync: mirror a reMarkable tablet's documents into a local PDF tree.
//!
//! # Usage
//!
//! ```text
//! rmsync download [PATTERN]... [--dir <path>] [--dry-run]
//! rmsync config show
//! rmsync config init [--host <addr>]
//!
//! global: --host <addr>  --debug  --overwrite  --no-pdf
//! ```

mod commands;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use commands::{config::ConfigCommand, download::DownloadArgs};
use rmsync_core::{config, Config};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "rmsync",
    version,
    about = "Download documents from a reMarkable tablet and keep a local copy in sync",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand; each overrides `~/.rmsync/config.yaml`.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Tablet address (`host[:port]`).
    #[arg(long, global = true, value_name = "ADDR")]
    pub host: Option<String>,

    /// Verbose logging.
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    /// Overwrite stale local files instead of writing "<name> (N).pdf".
    #[arg(long, short = 'f', global = true)]
    pub overwrite: bool,

    /// Never download; only report and clean up.
    #[arg(long, global = true)]
    pub no_pdf: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download new and changed documents, delete local files no longer on the tablet.
    Download(DownloadArgs),

    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Resolved environment handed to every command.
#[derive(Debug)]
pub struct AppContext {
    pub home: PathBuf,
    pub config: Config,
    pub globals: GlobalArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "ERROR:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    let config = config::load_at(&home).context("failed to load config")?;
    logging::init(cli.globals.debug || config.debug);

    let ctx = AppContext {
        home,
        config,
        globals: cli.globals,
    };
    match cli.command {
        Commands::Download(args) => args.run(&ctx),
        Commands::Config { command } => commands::config::run(command, &ctx),
    }
}
