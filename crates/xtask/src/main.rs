//! Development tasks for the lenient death workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod content;

use anyhow::Result;
use clap::Parser;
use commands::{CheckConfig, Simulate};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Development tasks for the lenient death workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the lenient death pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scripted death over the void and report what happened
    Simulate(Simulate),

    /// Validate a config file against an item catalog
    CheckConfig(CheckConfig),
}

fn main() -> Result<()> {
    // RUST_LOG overrides; info otherwise
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::CheckConfig(cmd) => cmd.execute(),
    }
}
