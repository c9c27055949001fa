//! Binary crate for the `deskapps` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts (login, configuration, delete confirmation)
//! - Themed terminal output

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod accounts;
mod cli;
mod contacts;
mod render;
mod weather;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
