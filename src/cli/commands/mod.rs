//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod harvest;
mod search;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "cumponidori")]
#[command(about = "Scraping proxy and bulk harvester for the VIA/VAS portal")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to cumponidori.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the proxy server
    Serve {
        /// Bind address: port, host, or host:port (overrides config)
        #[arg(short, long, env = "CUMPONIDORI_BIND")]
        bind: Option<String>,
    },

    /// Search the portal for projects
    Search {
        /// Search keyword
        keyword: String,
        /// Result page to fetch
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Restrict results to one procedure status
        #[arg(short, long)]
        status: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download every document of the projects matching a search
    Harvest {
        /// Search keyword
        keyword: String,
        /// Restrict results to one procedure status
        #[arg(short, long)]
        status: Option<String>,
        /// Search result pages to walk (0 = all)
        #[arg(long, default_value = "0")]
        pages: u32,
        /// Output directory (overrides config)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Stop after this many projects (0 = unlimited)
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },
}

/// Check for the verbose flag before clap runs, so logging can be
/// initialized first.
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                settings.server.bind = serve::normalize_bind_address(&bind);
            }
            serve::cmd_serve(&settings).await
        }
        Commands::Search {
            keyword,
            page,
            status,
            json,
        } => search::cmd_search(&settings, &keyword, page, status.as_deref(), json).await,
        Commands::Harvest {
            keyword,
            status,
            pages,
            out,
            limit,
        } => {
            if let Some(out) = out {
                settings.harvest.output_dir = out;
            }
            harvest::cmd_harvest(&settings, &keyword, status.as_deref(), pages, limit).await
        }
    }
}
