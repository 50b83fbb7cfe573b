//! Secret references
//!
//! A declaration never embeds secret values. Actions and build environments
//! refer to secrets by where they come from; the provisioning side resolves them.

use serde::{Deserialize, Serialize};

/// Reference to a secret value held outside the declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SecretRef {
    /// Value read from an environment variable at deploy time
    Environment { variable: String },
}

impl SecretRef {
    /// Reference a secret by environment variable name
    pub fn env(variable: impl Into<String>) -> Self {
        Self::Environment {
            variable: variable.into(),
        }
    }
}

impl std::fmt::Display for SecretRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretRef::Environment { variable } => write!(f, "env:{}", variable),
        }
    }
}
