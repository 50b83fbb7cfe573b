//! Configuration module
//!
//! Handles CLI configuration and turns the environment into an assembled stack.

use anyhow::{Context, Result};
use infra_stack::{FastifyAppStack, StackConfig, StackProps};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Stack name override
    pub stack_name: Option<String>,
}

impl Config {
    /// Stack properties with CLI overrides applied
    pub fn props(&self) -> StackProps {
        match &self.stack_name {
            Some(name) => StackProps::default().with_stack_name(name),
            None => StackProps::default(),
        }
    }

    /// Reads the stack configuration from the environment and assembles the stack
    pub fn assemble_stack(&self) -> Result<FastifyAppStack> {
        let stack_config = StackConfig::from_env().context("Failed to load stack configuration")?;
        let stack = FastifyAppStack::assemble(&stack_config, &self.props())
            .context("Failed to assemble stack")?;
        Ok(stack)
    }
}
