//! Application stack assembly
//!
//! Declares, in order: network, cluster, load-balanced service with its CPU
//! scaling rule, build project, and the Source → Build → Deploy pipeline that
//! delivers new images to the service.

use infra_core::{
    ActionConfig, AssemblyError, GitHubTrigger, Pipeline, ScalingRule, SecretRef,
    ServiceDescriptor, StageChain,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::build::BuildProject;
use crate::config::{GITHUB_TOKEN, StackConfig};
use crate::error::Result;
use crate::network::{Cluster, Vpc};
use crate::props::StackProps;
use crate::service::LoadBalancedService;

pub const VPC_NAME: &str = "FastifyAppVpc";
pub const CLUSTER_NAME: &str = "FastifyAppCluster";
pub const SERVICE_NAME: &str = "FastifyAppFargateService";

/// The fully assembled application stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastifyAppStack {
    pub name: String,
    pub account: String,
    pub region: String,
    pub vpc: Vpc,
    pub cluster: Cluster,
    pub service: LoadBalancedService,
    pub build_project: BuildProject,
    pub pipeline: Pipeline,
}

impl FastifyAppStack {
    /// Assembles the stack declaration
    ///
    /// # Arguments
    /// * `config` - Externally supplied values (account, repository, registry)
    /// * `props` - Shape of the stack
    ///
    /// # Errors
    /// Returns an error if the stack name is blank, any declaration is out of
    /// range or the pipeline cannot be chained. Nothing is partially returned.
    pub fn assemble(config: &StackConfig, props: &StackProps) -> Result<Self> {
        if props.stack_name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Stack").into());
        }

        info!(
            "Assembling stack '{}' for account {} in {}",
            props.stack_name, config.account, config.region
        );

        let vpc = Vpc::new(VPC_NAME, props.max_azs)?;
        let cluster = Cluster::new(CLUSTER_NAME, &vpc)?;

        let descriptor = ServiceDescriptor::new(
            SERVICE_NAME,
            props.container_name.as_str(),
            props.image.as_str(),
            props.container_port,
            props.desired_replicas,
        )?;
        let mut service = LoadBalancedService::new(&cluster, descriptor);
        service.auto_scale(
            ScalingRule::cpu(props.cpu_target_percent, props.max_capacity)
                .with_cooldowns(props.scale_in_cooldown, props.scale_out_cooldown),
        )?;
        debug!(
            "Declared service '{}' on port {}",
            service.service.name(),
            service.service.port()
        );

        let build_project =
            BuildProject::for_image(&props.build_project_name, &props.container_name, config)?;

        let pipeline = assemble_pipeline(config, props, &build_project, &service.service)?;
        info!(
            "Pipeline '{}' assembled with {} stages",
            pipeline.name(),
            pipeline.len()
        );

        Ok(Self {
            name: props.stack_name.clone(),
            account: config.account.clone(),
            region: config.region.clone(),
            vpc,
            cluster,
            service,
            build_project,
            pipeline,
        })
    }

    /// Checks a stack that was not built by [`FastifyAppStack::assemble`]
    ///
    /// Covers the stack name, the service descriptor and its scaling rule,
    /// every pipeline invariant, and that deploy actions target this stack's
    /// service.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Stack").into());
        }

        self.service.service.validate()?;
        self.pipeline.validate()?;

        let service_id = self.service.service.id();
        for action in self.pipeline.stages().iter().flat_map(|s| s.actions()) {
            match action.config() {
                ActionConfig::EcsDeploy { service } if *service != service_id => {
                    return Err(AssemblyError::InvalidPipeline(format!(
                        "deploy action '{}' targets unknown service {}",
                        action.name(),
                        service
                    ))
                    .into());
                }
                _ => {}
            }
        }

        Ok(())
    }
}

fn assemble_pipeline(
    config: &StackConfig,
    props: &StackProps,
    build_project: &BuildProject,
    target: &ServiceDescriptor,
) -> Result<Pipeline> {
    let mut chain = StageChain::new(props.pipeline_name.as_str())?;

    let (source_artifact, source_stage) = chain.add_source_stage(
        "Source",
        "GitHub",
        ActionConfig::GitHubSource {
            owner: config.repo_owner.clone(),
            repo: config.repo_name.clone(),
            branch: config.branch.clone(),
            oauth_token: SecretRef::env(GITHUB_TOKEN),
            trigger: GitHubTrigger::Poll,
        },
    )?;

    let (build_artifact, build_stage) = chain.add_build_stage(
        "Build",
        "Build",
        ActionConfig::CodeBuild {
            project: build_project.name.clone(),
        },
        &source_artifact,
        &source_stage,
    )?;

    chain.add_deploy_stage("Deploy", "Deploy", &build_artifact, &build_stage, target)?;

    Ok(chain.finish()?)
}
