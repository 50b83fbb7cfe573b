//! Action domain types

use serde::{Deserialize, Serialize};

use super::artifact::Artifact;
use super::secret::SecretRef;
use super::service::ServiceId;

/// Category of work an action performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Source,
    Build,
    Deploy,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Source => write!(f, "Source"),
            ActionKind::Build => write!(f, "Build"),
            ActionKind::Deploy => write!(f, "Deploy"),
        }
    }
}

/// How a source action notices new commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GitHubTrigger {
    /// No automatic trigger
    None,
    /// Periodically poll the repository
    Poll,
    /// Register a repository webhook
    Webhook,
}

/// Provider-specific action settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum ActionConfig {
    /// Fetch a branch from a GitHub repository
    GitHubSource {
        owner: String,
        repo: String,
        branch: String,
        oauth_token: SecretRef,
        trigger: GitHubTrigger,
    },

    /// Run a build project against the input artifact
    CodeBuild { project: String },

    /// Roll new image definitions out to a container service
    EcsDeploy { service: ServiceId },
}

impl ActionConfig {
    /// The kind of action this configuration describes
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionConfig::GitHubSource { .. } => ActionKind::Source,
            ActionConfig::CodeBuild { .. } => ActionKind::Build,
            ActionConfig::EcsDeploy { .. } => ActionKind::Deploy,
        }
    }
}

/// A single unit of work within a stage
///
/// Actions are created by the stage chain builder, which wires their input
/// and output artifacts. They are immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    name: String,
    kind: ActionKind,
    input: Option<Artifact>,
    output: Option<Artifact>,
    config: ActionConfig,
}

impl Action {
    pub(crate) fn new(
        name: String,
        config: ActionConfig,
        input: Option<Artifact>,
        output: Option<Artifact>,
    ) -> Self {
        Self {
            name,
            kind: config.kind(),
            input,
            output,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Artifact consumed by this action, if any
    pub fn input(&self) -> Option<&Artifact> {
        self.input.as_ref()
    }

    /// Artifact produced by this action, if any
    pub fn output(&self) -> Option<&Artifact> {
        self.output.as_ref()
    }

    pub fn config(&self) -> &ActionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_config() {
        let config = ActionConfig::CodeBuild {
            project: "fastify-app-build".to_string(),
        };
        let action = Action::new("Build".to_string(), config, None, None);
        assert_eq!(action.kind(), ActionKind::Build);
    }

    #[test]
    fn test_trigger_serialization() {
        let json = serde_json::to_string(&GitHubTrigger::Poll).unwrap();
        assert_eq!(json, "\"POLL\"");
    }
}
