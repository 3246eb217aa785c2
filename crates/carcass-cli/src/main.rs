//! Carcass CLI
//!
//! Provisions a local network of Minecraft servers: backends behind a
//! single proxy, each with its server jar, configuration, plugins and start
//! scripts.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {e}", "warning".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    let config = commands::load_config(&cwd, cli.config, cli.network.into_overrides())?;

    match cli.command.unwrap_or(Commands::Provision) {
        Commands::Provision => commands::run_provision(&config).await,
        Commands::UpdatePlugins => commands::run_update_plugins(&config).await,
    }
}
