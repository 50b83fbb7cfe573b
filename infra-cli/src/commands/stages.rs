//! Stages command handler

use anyhow::Result;
use colored::*;
use infra_core::{Action, ActionConfig, Pipeline, Stage};

use crate::config::Config;

/// List the pipeline stages in execution order
pub fn list_stages(config: &Config) -> Result<()> {
    let stack = config.assemble_stack()?;
    let pipeline = &stack.pipeline;

    println!(
        "{}",
        format!(
            "Pipeline {} ({} stage(s)):",
            pipeline.name(),
            pipeline.len()
        )
        .bold()
    );
    println!();

    for (index, stage) in pipeline.stages().iter().enumerate() {
        print_stage(pipeline, index, stage);
    }

    Ok(())
}

fn print_stage(pipeline: &Pipeline, index: usize, stage: &Stage) {
    println!("  {} {}. {}", "▸".cyan(), index + 1, stage.name().bold());

    let after = stage
        .predecessor()
        .and_then(|id| pipeline.stage(id))
        .map(|s| s.name().to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("    After:   {}", after.dimmed());

    for action in stage.actions() {
        print_action(action);
    }
    println!();
}

fn print_action(action: &Action) {
    println!(
        "    Action:  {} {}",
        action.name().cyan(),
        format!("({})", action.kind()).dimmed()
    );
    if let Some(input) = action.input() {
        println!("    Input:   {}", input.name());
    }
    if let Some(output) = action.output() {
        println!("    Output:  {}", output.name());
    }

    let detail = match action.config() {
        ActionConfig::GitHubSource {
            owner,
            repo,
            branch,
            ..
        } => format!("github.com/{}/{}@{}", owner, repo, branch),
        ActionConfig::CodeBuild { project } => format!("project {}", project),
        ActionConfig::EcsDeploy { service } => format!("service {}", service),
    };
    println!("    Target:  {}", detail.dimmed());
}
