//! Stage chain builder
//!
//! Assembles a strictly linear pipeline: a source stage first, then stages
//! that are each anchored immediately after the previous one and consume an
//! artifact produced earlier in the chain. A deploy stage ends the chain.
//!
//! All checks run before the pipeline is touched, so a failed call leaves it
//! unmodified.

use tracing::debug;

use crate::domain::action::{Action, ActionConfig, ActionKind};
use crate::domain::artifact::Artifact;
use crate::domain::pipeline::Pipeline;
use crate::domain::service::ServiceDescriptor;
use crate::domain::stage::{Stage, StageRef};
use crate::error::{AssemblyError, Result};

/// Builder that appends stages to a pipeline in execution order
///
/// # Example
/// ```
/// use infra_core::chain::StageChain;
/// use infra_core::domain::action::{ActionConfig, GitHubTrigger};
/// use infra_core::domain::secret::SecretRef;
/// use infra_core::domain::service::ServiceDescriptor;
///
/// let service = ServiceDescriptor::new("web", "app", "owner/app", 3000, 1)?;
/// let mut chain = StageChain::new("app-pipeline")?;
///
/// let (source, source_stage) = chain.add_source_stage(
///     "Source",
///     "GitHub",
///     ActionConfig::GitHubSource {
///         owner: "owner".to_string(),
///         repo: "app".to_string(),
///         branch: "master".to_string(),
///         oauth_token: SecretRef::env("GITHUB_TOKEN"),
///         trigger: GitHubTrigger::Poll,
///     },
/// )?;
/// let (build, build_stage) = chain.add_build_stage(
///     "Build",
///     "Build",
///     ActionConfig::CodeBuild { project: "app-build".to_string() },
///     &source,
///     &source_stage,
/// )?;
/// chain.add_deploy_stage("Deploy", "Deploy", &build, &build_stage, &service)?;
///
/// let pipeline = chain.finish()?;
/// assert_eq!(pipeline.len(), 3);
/// # Ok::<(), infra_core::AssemblyError>(())
/// ```
#[derive(Debug)]
pub struct StageChain {
    pipeline: Pipeline,
}

impl StageChain {
    /// Starts a new, empty pipeline
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Pipeline"));
        }

        Ok(Self {
            pipeline: Pipeline::new(name),
        })
    }

    /// The pipeline as assembled so far
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Adds the first stage, fetching source code
    ///
    /// # Returns
    /// The artifact holding the fetched source and a handle to the new stage
    ///
    /// # Errors
    /// Fails if the pipeline already has stages, a name is blank, or `config`
    /// is not a source action.
    pub fn add_source_stage(
        &mut self,
        stage_name: &str,
        action_name: &str,
        config: ActionConfig,
    ) -> Result<(Artifact, StageRef)> {
        check_names(stage_name, action_name)?;
        check_kind(stage_name, ActionKind::Source, &config)?;

        if !self.pipeline.is_empty() {
            return Err(AssemblyError::SourceAlreadyPresent(
                self.pipeline.name().to_string(),
            ));
        }

        let output = Artifact::for_action(stage_name, action_name);
        let action = Action::new(action_name.to_string(), config, None, Some(output.clone()));
        let stage = self.push_stage(stage_name, action, None);

        Ok((output, stage))
    }

    /// Adds a build stage immediately after `after`
    ///
    /// The stage's single action consumes `input` and produces a new artifact.
    ///
    /// # Errors
    /// Fails if `after` is not in this pipeline, already has a successor or is
    /// terminal, if `input` was not produced at or before `after`, or if a
    /// name is blank or already used.
    pub fn add_build_stage(
        &mut self,
        stage_name: &str,
        action_name: &str,
        config: ActionConfig,
        input: &Artifact,
        after: &StageRef,
    ) -> Result<(Artifact, StageRef)> {
        check_names(stage_name, action_name)?;
        check_kind(stage_name, ActionKind::Build, &config)?;
        self.check_placement(stage_name, input, after)?;

        let output = Artifact::for_action(stage_name, action_name);
        let action = Action::new(
            action_name.to_string(),
            config,
            Some(input.clone()),
            Some(output.clone()),
        );
        let stage = self.push_stage(stage_name, action, Some(after));

        Ok((output, stage))
    }

    /// Adds the terminal deploy stage immediately after `after`
    ///
    /// The deploy action consumes `input`, produces nothing and is bound to
    /// `target`. No stage can be chained after it.
    ///
    /// # Errors
    /// Same placement and naming rules as [`StageChain::add_build_stage`].
    pub fn add_deploy_stage(
        &mut self,
        stage_name: &str,
        action_name: &str,
        input: &Artifact,
        after: &StageRef,
        target: &ServiceDescriptor,
    ) -> Result<StageRef> {
        check_names(stage_name, action_name)?;
        self.check_placement(stage_name, input, after)?;

        let config = ActionConfig::EcsDeploy {
            service: target.id(),
        };
        let action = Action::new(action_name.to_string(), config, Some(input.clone()), None);

        Ok(self.push_stage(stage_name, action, Some(after)))
    }

    /// Validates and returns the assembled pipeline
    pub fn finish(self) -> Result<Pipeline> {
        self.pipeline.validate()?;
        Ok(self.pipeline)
    }

    fn check_placement(&self, stage_name: &str, input: &Artifact, after: &StageRef) -> Result<()> {
        if self.pipeline.stage_by_name(stage_name).is_some() {
            return Err(AssemblyError::DuplicateStageName(stage_name.to_string()));
        }

        let anchor_index = self
            .pipeline
            .position(after.id())
            .ok_or_else(|| AssemblyError::UnknownStage(after.name().to_string()))?;
        let anchor = &self.pipeline.stages()[anchor_index];

        if anchor.is_terminal() {
            return Err(AssemblyError::TerminalStage(anchor.name().to_string()));
        }

        if let Some(successor) = self.pipeline.successor(after.id()) {
            return Err(AssemblyError::FanOut {
                anchor: anchor.name().to_string(),
                successor: successor.name().to_string(),
            });
        }

        if !self.pipeline.produces_through(input, anchor_index) {
            return Err(AssemblyError::UnknownArtifact(input.name().to_string()));
        }

        Ok(())
    }

    fn push_stage(&mut self, name: &str, action: Action, after: Option<&StageRef>) -> StageRef {
        debug!(
            "Adding stage '{}' ({} action '{}') after {}",
            name,
            action.kind(),
            action.name(),
            after.map(StageRef::name).unwrap_or("<start>")
        );

        let stage = Stage::new(name.to_string(), vec![action], after.map(StageRef::id));
        let handle = stage.handle();
        self.pipeline.push(stage);
        handle
    }
}

fn check_names(stage_name: &str, action_name: &str) -> Result<()> {
    if stage_name.trim().is_empty() {
        return Err(AssemblyError::EmptyName("Stage"));
    }
    if action_name.trim().is_empty() {
        return Err(AssemblyError::EmptyName("Action"));
    }
    Ok(())
}

fn check_kind(stage_name: &str, expected: ActionKind, config: &ActionConfig) -> Result<()> {
    let found = config.kind();
    if found != expected {
        return Err(AssemblyError::WrongActionKind {
            stage: stage_name.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::GitHubTrigger;
    use crate::domain::secret::SecretRef;

    fn github(branch: &str) -> ActionConfig {
        ActionConfig::GitHubSource {
            owner: "andreiox".to_string(),
            repo: "fastify-test-drive".to_string(),
            branch: branch.to_string(),
            oauth_token: SecretRef::env("GITHUB_TOKEN"),
            trigger: GitHubTrigger::Poll,
        }
    }

    fn codebuild() -> ActionConfig {
        ActionConfig::CodeBuild {
            project: "fastify-app-build".to_string(),
        }
    }

    fn service() -> ServiceDescriptor {
        ServiceDescriptor::new(
            "FastifyAppFargateService",
            "fastify-app",
            "andreiox/fastify-test-drive",
            3000,
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_source_build_deploy_chain() {
        let service = service();
        let mut chain = StageChain::new("fastify-app-pipeline").unwrap();

        let (source_out, source) = chain
            .add_source_stage("Source", "GitHub", github("master"))
            .unwrap();
        let (build_out, build) = chain
            .add_build_stage("Build", "Build", codebuild(), &source_out, &source)
            .unwrap();
        let deploy = chain
            .add_deploy_stage("Deploy", "Deploy", &build_out, &build, &service)
            .unwrap();

        let pipeline = chain.finish().unwrap();
        let names: Vec<&str> = pipeline.stages().iter().map(Stage::name).collect();
        assert_eq!(names, vec!["Source", "Build", "Deploy"]);

        let build_stage = pipeline.stage(build.id()).unwrap();
        let deploy_stage = pipeline.stage(deploy.id()).unwrap();

        assert_eq!(build_stage.actions()[0].input(), Some(&source_out));
        assert_eq!(build_stage.actions()[0].output(), Some(&build_out));
        assert_eq!(deploy_stage.actions()[0].input(), Some(&build_out));
        assert_eq!(deploy_stage.actions()[0].output(), None);

        match deploy_stage.actions()[0].config() {
            ActionConfig::EcsDeploy { service: id } => assert_eq!(*id, service.id()),
            other => panic!("unexpected deploy config: {:?}", other),
        }
    }

    #[test]
    fn test_predecessor_precedes_stage() {
        let service = service();
        let mut chain = StageChain::new("p").unwrap();
        let (src, s) = chain.add_source_stage("Source", "GitHub", github("main")).unwrap();
        let (out, b) = chain
            .add_build_stage("Build", "Build", codebuild(), &src, &s)
            .unwrap();
        chain
            .add_deploy_stage("Deploy", "Deploy", &out, &b, &service)
            .unwrap();

        let pipeline = chain.finish().unwrap();
        assert!(pipeline.stages()[0].predecessor().is_none());
        for (index, stage) in pipeline.stages().iter().enumerate().skip(1) {
            let predecessor = stage.predecessor().unwrap();
            assert!(pipeline.position(predecessor).unwrap() < index);
        }
    }

    #[test]
    fn test_unknown_predecessor_leaves_pipeline_unmodified() {
        let mut other = StageChain::new("other").unwrap();
        let (foreign_out, foreign) = other
            .add_source_stage("Source", "GitHub", github("main"))
            .unwrap();

        let mut chain = StageChain::new("p").unwrap();
        let (src, _) = chain
            .add_source_stage("Source", "GitHub", github("main"))
            .unwrap();

        let result = chain.add_build_stage("Build", "Build", codebuild(), &src, &foreign);
        assert_eq!(
            result.unwrap_err(),
            AssemblyError::UnknownStage("Source".to_string())
        );
        assert_eq!(chain.pipeline().len(), 1);

        let result = chain.add_build_stage("Build", "Build", codebuild(), &foreign_out, &foreign);
        assert!(result.is_err());
        assert_eq!(chain.pipeline().len(), 1);
    }

    #[test]
    fn test_fan_out_is_rejected() {
        let mut chain = StageChain::new("p").unwrap();
        let (src, s) = chain.add_source_stage("Source", "GitHub", github("main")).unwrap();
        chain
            .add_build_stage("Build", "Build", codebuild(), &src, &s)
            .unwrap();

        let result = chain.add_build_stage("Test", "Test", codebuild(), &src, &s);
        assert!(matches!(result, Err(AssemblyError::FanOut { .. })));
        assert_eq!(chain.pipeline().len(), 2);
    }

    #[test]
    fn test_deploy_is_terminal() {
        let service = service();
        let mut chain = StageChain::new("p").unwrap();
        let (src, s) = chain.add_source_stage("Source", "GitHub", github("main")).unwrap();
        let (out, b) = chain
            .add_build_stage("Build", "Build", codebuild(), &src, &s)
            .unwrap();
        let deploy = chain
            .add_deploy_stage("Deploy", "Deploy", &out, &b, &service)
            .unwrap();

        let result = chain.add_build_stage("Verify", "Verify", codebuild(), &out, &deploy);
        assert_eq!(
            result.unwrap_err(),
            AssemblyError::TerminalStage("Deploy".to_string())
        );
        assert_eq!(chain.pipeline().len(), 3);
    }

    #[test]
    fn test_input_must_come_from_earlier_stage() {
        let mut chain = StageChain::new("p").unwrap();
        let (_, s) = chain.add_source_stage("Source", "GitHub", github("main")).unwrap();

        let stray = Artifact::new("stray");
        let result = chain.add_build_stage("Build", "Build", codebuild(), &stray, &s);
        assert_eq!(
            result.unwrap_err(),
            AssemblyError::UnknownArtifact("stray".to_string())
        );
        assert_eq!(chain.pipeline().len(), 1);
    }

    #[test]
    fn test_source_must_be_first() {
        let mut chain = StageChain::new("p").unwrap();
        chain.add_source_stage("Source", "GitHub", github("main")).unwrap();

        let result = chain.add_source_stage("Source2", "GitHub", github("dev"));
        assert!(matches!(result, Err(AssemblyError::SourceAlreadyPresent(_))));
    }

    #[test]
    fn test_duplicate_stage_name() {
        let mut chain = StageChain::new("p").unwrap();
        let (src, s) = chain.add_source_stage("Source", "GitHub", github("main")).unwrap();

        let result = chain.add_build_stage("Source", "Build", codebuild(), &src, &s);
        assert_eq!(
            result.unwrap_err(),
            AssemblyError::DuplicateStageName("Source".to_string())
        );
    }

    #[test]
    fn test_wrong_action_kind() {
        let mut chain = StageChain::new("p").unwrap();
        let result = chain.add_source_stage("Source", "Build", codebuild());
        assert!(matches!(
            result,
            Err(AssemblyError::WrongActionKind {
                expected: ActionKind::Source,
                found: ActionKind::Build,
                ..
            })
        ));
        assert!(chain.pipeline().is_empty());
    }

    #[test]
    fn test_blank_names() {
        assert!(StageChain::new("  ").is_err());

        let mut chain = StageChain::new("p").unwrap();
        assert_eq!(
            chain.add_source_stage("", "GitHub", github("main")).unwrap_err(),
            AssemblyError::EmptyName("Stage")
        );
        assert_eq!(
            chain.add_source_stage("Source", " ", github("main")).unwrap_err(),
            AssemblyError::EmptyName("Action")
        );
    }

    #[test]
    fn test_finish_requires_stages() {
        let chain = StageChain::new("p").unwrap();
        assert!(chain.finish().is_err());
    }
}
