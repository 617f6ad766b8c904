//! tenderstar - Prozorro procurement data into a CSV star schema
//!
//! Lists contracts from the openprocurement API, enriches each with its
//! tender, and writes a fact table plus dimension tables.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "tenderstar")]
#[command(about = "Prozorro contracts and tenders into a CSV star schema")]
#[command(version)]
struct Cli {
    /// Defaults to `run`
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors (--debug wins)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file path (default: ./tenderstar.toml or ~/.config/tenderstar/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Connect timeout in seconds
    #[arg(long, global = true)]
    connect_timeout: Option<u64>,

    /// Whole-request timeout in seconds
    #[arg(long, global = true)]
    request_timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch contracts and tenders, write the CSV tables
    Run(cmd::run::RunArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(tenderstar_core::ProgressContext::new());

    // Logging:
    //   TTY:     through the progress display
    //   non-TTY: plain lines
    //   info by default, warn with --quiet, debug with --debug
    let multi = if progress.is_tty() {
        Some(progress.multi())
    } else {
        None
    };
    tenderstar_core::init_logging(cli.quiet, cli.debug, multi);

    let config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // Config file defaults, CLI overrides
    let http = config
        .http
        .to_core(cli.connect_timeout, cli.request_timeout);

    match cli.command {
        Some(Command::Config) => {
            cmd::show::run(&config, &http);
            Ok(())
        }
        Some(Command::Run(args)) => {
            tenderstar_core::set_http_config(http);
            cmd::run::run(args, &config, &progress)
        }
        None => {
            tenderstar_core::set_http_config(http);
            cmd::run::run(cmd::run::RunArgs::default(), &config, &progress)
        }
    }
}
