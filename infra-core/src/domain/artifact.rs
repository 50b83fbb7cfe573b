//! Artifact domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle to a bundle of bytes passed between stages
///
/// An artifact carries no payload at assembly time. Two handles are equal
/// only if they are the same artifact, regardless of name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    id: Uuid,
    name: String,
}

impl Artifact {
    /// Creates a new artifact with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Creates the artifact produced by `action` in `stage`
    ///
    /// Follows the `Artifact_<Stage>_<Action>` naming used when no explicit
    /// name is given.
    pub fn for_action(stage: &str, action: &str) -> Self {
        Self::new(format!("Artifact_{}_{}", stage, action))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artifact {}

impl std::hash::Hash for Artifact {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality() {
        let a = Artifact::new("bundle");
        let b = Artifact::new("bundle");

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_default_name() {
        let artifact = Artifact::for_action("Source", "GitHub");
        assert_eq!(artifact.name(), "Artifact_Source_GitHub");
    }
}
