//! Error types for declaration assembly

use thiserror::Error;

use crate::domain::action::ActionKind;

/// Result type alias for assembly operations
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Errors raised while assembling a declaration
///
/// Every variant is raised before the declaration is modified, so a failed
/// call leaves the pipeline or service exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssemblyError {
    /// A stage or action was given a blank name
    #[error("{0} name cannot be empty")]
    EmptyName(&'static str),

    /// A stage with this name is already part of the pipeline
    #[error("Stage '{0}' already exists in the pipeline")]
    DuplicateStageName(String),

    /// The source stage must be the first stage of the pipeline
    #[error("Pipeline '{0}' already has stages; the source stage must come first")]
    SourceAlreadyPresent(String),

    /// The placement anchor is not a member of this pipeline
    #[error("Stage '{0}' is not part of the pipeline")]
    UnknownStage(String),

    /// The placement anchor already has a successor
    #[error("Stage '{anchor}' is already followed by '{successor}'")]
    FanOut {
        /// Stage the new stage was anchored to
        anchor: String,
        /// Stage already placed after the anchor
        successor: String,
    },

    /// Deploy stages end the chain
    #[error("Stage '{0}' is terminal; no stage can be placed after it")]
    TerminalStage(String),

    /// The input artifact was not produced at or before the anchor stage
    #[error("Artifact '{0}' is not produced by any stage preceding the new stage")]
    UnknownArtifact(String),

    /// The action does not fit the stage it is added to
    #[error("Stage '{stage}' expects a {expected} action, got {found}")]
    WrongActionKind {
        /// Stage being added
        stage: String,
        /// Kind the stage requires
        expected: ActionKind,
        /// Kind of the supplied action
        found: ActionKind,
    },

    /// A pipeline failed structural validation
    #[error("Invalid pipeline: {0}")]
    InvalidPipeline(String),

    /// A numeric parameter is outside its allowed range
    #[error("Parameter '{name}' is out of range: {reason}")]
    OutOfRange {
        /// Parameter name
        name: &'static str,
        /// What the allowed range is
        reason: String,
    },

    /// A required value is missing or blank
    #[error("Missing required value: {0}")]
    MissingValue(&'static str),

    /// The service already carries a scaling rule
    #[error("Service '{0}' already has a scaling rule attached")]
    ScalingRuleAlreadyAttached(String),
}

impl AssemblyError {
    /// Create an out-of-range error
    pub fn out_of_range(name: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AssemblyError::FanOut {
            anchor: "Source".to_string(),
            successor: "Build".to_string(),
        };
        assert_eq!(err.to_string(), "Stage 'Source' is already followed by 'Build'");

        let err = AssemblyError::out_of_range("port", "must be in 1..=65535");
        assert_eq!(
            err.to_string(),
            "Parameter 'port' is out of range: must be in 1..=65535"
        );
    }
}
