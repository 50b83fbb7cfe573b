//! Stage domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::{Action, ActionKind};
use super::artifact::Artifact;

/// Identity of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(Uuid);

impl StageId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A named phase of the pipeline holding one or more actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    id: StageId,
    name: String,
    actions: Vec<Action>,
    predecessor: Option<StageId>,
}

impl Stage {
    pub(crate) fn new(name: String, actions: Vec<Action>, predecessor: Option<StageId>) -> Self {
        Self {
            id: StageId::new(),
            name,
            actions,
            predecessor,
        }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Stage this one is placed immediately after
    pub fn predecessor(&self) -> Option<StageId> {
        self.predecessor
    }

    /// Whether this stage ends the chain
    pub fn is_terminal(&self) -> bool {
        self.actions.iter().any(|a| a.kind() == ActionKind::Deploy)
    }

    /// Artifacts produced by this stage's actions
    pub fn outputs(&self) -> impl Iterator<Item = &Artifact> {
        self.actions.iter().filter_map(Action::output)
    }

    /// Artifacts consumed by this stage's actions
    pub fn inputs(&self) -> impl Iterator<Item = &Artifact> {
        self.actions.iter().filter_map(Action::input)
    }

    /// Lightweight handle used to anchor the next stage
    pub fn handle(&self) -> StageRef {
        StageRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Handle to a stage already placed in a pipeline
///
/// Returned by the chain builder and passed back as the `after` anchor of
/// the next stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRef {
    id: StageId,
    name: String,
}

impl StageRef {
    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for StageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
