//! Error types for stack assembly

use infra_core::AssemblyError;
use thiserror::Error;

/// Result type alias for stack operations
pub type Result<T> = std::result::Result<T, StackError>;

/// Errors raised while loading configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more required variables are unset or blank
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Errors that can occur when assembling or rendering the stack
#[derive(Debug, Error)]
pub enum StackError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A declaration could not be assembled
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// The manifest could not be rendered
    #[error("Failed to render manifest: {0}")]
    Render(#[from] serde_json::Error),
}
