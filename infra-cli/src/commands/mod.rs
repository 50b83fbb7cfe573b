//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod build;
mod stages;
mod synth;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the stack and print or write its manifest
    Synth {
        /// Write the manifest to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the pipeline stages and the artifacts flowing between them
    Stages,
    /// Print the build script used by the build stage
    Buildspec {
        /// Container the image definitions entry names
        #[arg(long, default_value = "fastify-app")]
        container: String,
    },
    /// Print the image definitions file the build stage produces
    ImageDefinitions {
        /// Container name
        #[arg(long, default_value = "fastify-app")]
        container: String,

        /// Image repository (defaults to IMAGE_REPO_NAME)
        #[arg(long)]
        repo: Option<String>,

        /// Image tag (defaults to IMAGE_TAG)
        #[arg(long)]
        tag: Option<String>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Synth { output } => synth::synth(config, output.as_deref()),
        Commands::Stages => stages::list_stages(config),
        Commands::Buildspec { container } => build::print_buildspec(&container),
        Commands::ImageDefinitions {
            container,
            repo,
            tag,
        } => build::print_image_definitions(&container, repo, tag),
    }
}
