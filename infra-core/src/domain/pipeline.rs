//! Pipeline domain types

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::artifact::Artifact;
use super::stage::{Stage, StageId};
use crate::error::{AssemblyError, Result};

/// An ordered sequence of stages
///
/// Stage order is execution order. Pipelines are built through
/// [`StageChain`](crate::chain::StageChain), which keeps the invariants
/// checked by [`Pipeline::validate`] at every step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            stages: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Index of a stage in execution order
    pub fn position(&self, id: StageId) -> Option<usize> {
        self.stages.iter().position(|s| s.id() == id)
    }

    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id() == id)
    }

    pub fn stage_by_name(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name() == name)
    }

    /// The stage placed immediately after `id`, if any
    pub fn successor(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.predecessor() == Some(id))
    }

    /// Whether `artifact` is produced by a stage at or before index `upto`
    pub(crate) fn produces_through(&self, artifact: &Artifact, upto: usize) -> bool {
        self.stages
            .iter()
            .take(upto + 1)
            .any(|s| s.outputs().any(|o| o == artifact))
    }

    /// Checks every structural invariant of the pipeline
    ///
    /// # Errors
    /// Returns [`AssemblyError::InvalidPipeline`] if:
    /// - The pipeline name is blank or the pipeline has no stages
    /// - Two stages share a name, or a stage has no actions
    /// - A stage is not anchored immediately after the stage before it
    /// - A stage follows a terminal stage
    /// - An artifact is consumed before it is produced, or produced twice
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Pipeline"));
        }

        if self.stages.is_empty() {
            return Err(invalid(format!("pipeline '{}' has no stages", self.name)));
        }

        let mut names = HashSet::new();
        let mut produced: HashSet<&Artifact> = HashSet::new();

        for (index, stage) in self.stages.iter().enumerate() {
            if !names.insert(stage.name()) {
                return Err(AssemblyError::DuplicateStageName(stage.name().to_string()));
            }

            if stage.actions().is_empty() {
                return Err(invalid(format!("stage '{}' has no actions", stage.name())));
            }

            let expected = index.checked_sub(1).map(|i| self.stages[i].id());
            if stage.predecessor() != expected {
                return Err(invalid(format!(
                    "stage '{}' at position {} is not anchored to the stage before it",
                    stage.name(),
                    index
                )));
            }

            if index > 0 && self.stages[index - 1].is_terminal() {
                return Err(AssemblyError::TerminalStage(
                    self.stages[index - 1].name().to_string(),
                ));
            }

            // Inputs must come from strictly earlier stages, so check them
            // before recording this stage's outputs.
            for input in stage.inputs() {
                if !produced.contains(input) {
                    return Err(AssemblyError::UnknownArtifact(input.name().to_string()));
                }
            }

            for output in stage.outputs() {
                if !produced.insert(output) {
                    return Err(invalid(format!(
                        "artifact '{}' is produced more than once",
                        output.name()
                    )));
                }
            }
        }

        Ok(())
    }
}

fn invalid(reason: String) -> AssemblyError {
    AssemblyError::InvalidPipeline(reason)
}
