//! fastify-infra CLI
//!
//! Command-line interface for assembling the fastify application stack and
//! inspecting its delivery pipeline.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fastify-infra")]
#[command(about = "Fastify app infrastructure declaration CLI", long_about = None)]
struct Cli {
    /// File with KEY=value lines loaded into the environment before anything else
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Override the stack name
    #[arg(long, env = "FASTIFY_STACK_NAME")]
    stack_name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Logs go to stderr so rendered JSON on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fastify_infra=info,infra_stack=info,infra_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    load_env_file(&cli.env_file)?;

    let config = Config {
        stack_name: cli.stack_name,
    };

    handle_command(cli.command, &config)
}

/// Loads `path` into the process environment
///
/// A missing file is not an error; variables may come from the real
/// environment instead.
fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => {
            tracing::debug!("No environment file at {}", path.display());
            Ok(())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to load environment file {}", path.display()))
        }
    }
}
