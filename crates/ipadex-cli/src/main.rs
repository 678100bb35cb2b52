//! ipadex CLI

use anyhow::Result;
use clap::Parser;
use ipadex_core::SiteLayout;
use tracing_subscriber::EnvFilter;

use ipadex_cli::cmd;
use ipadex_cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let layout = SiteLayout::new(cli.root);

    match cli.command {
        Commands::Run => cmd::run::run(&layout),
        Commands::Export => cmd::export::export(&layout),
        Commands::Index => cmd::index::index(&layout),
    }
}
