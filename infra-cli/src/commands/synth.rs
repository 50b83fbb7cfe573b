//! Synth command handler
//!
//! Assembles the stack and renders its manifest.

use anyhow::{Context, Result};
use colored::*;
use infra_stack::Manifest;
use std::path::Path;

use crate::config::Config;

/// Assemble the stack and print the manifest, or write it to `output`
pub fn synth(config: &Config, output: Option<&Path>) -> Result<()> {
    let stack = config.assemble_stack()?;
    let manifest = Manifest::new(stack);
    let json = manifest.to_json().context("Failed to render manifest")?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write manifest to {}", path.display()))?;

            eprintln!("{}", "✓ Stack synthesized successfully!".green().bold());
            eprintln!("  Stack:    {}", manifest.stack.name.bold());
            eprintln!("  Pipeline: {}", manifest.stack.pipeline.name().cyan());
            eprintln!("  Manifest: {}", path.display().to_string().dimmed());
        }
        None => println!("{}", json),
    }

    Ok(())
}
