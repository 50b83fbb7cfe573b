//! Build project declaration

use infra_core::{AssemblyError, Result, SecretRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::buildspec::BuildSpec;
use crate::config::{
    DOCKER_HUB_PASSWORD, DOCKER_HUB_USER, IMAGE_REPO_NAME, IMAGE_TAG, StackConfig,
};

/// Managed build image with a container runtime
pub const STANDARD_BUILD_IMAGE: &str = "aws/codebuild/standard:4.0";

/// Size of the build machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComputeType {
    Small,
    Medium,
    Large,
}

/// Value of a build environment variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EnvironmentValue {
    Plaintext(String),
    Secret(SecretRef),
}

/// Project that runs the build stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildProject {
    pub name: String,
    pub compute_type: ComputeType,
    pub build_image: String,
    /// Needed to run the container daemon inside the build
    pub privileged: bool,
    pub environment: BTreeMap<String, EnvironmentValue>,
    pub buildspec: BuildSpec,
}

impl BuildProject {
    /// Declares the image build project for `container`
    ///
    /// Registry user, repository and tag are passed as plain variables; the
    /// registry password is passed as a reference so the declaration never
    /// holds it.
    pub fn for_image(name: &str, container: &str, config: &StackConfig) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Build project"));
        }

        let environment = BTreeMap::from([
            (
                DOCKER_HUB_USER.to_string(),
                EnvironmentValue::Plaintext(config.registry_user.clone()),
            ),
            (
                DOCKER_HUB_PASSWORD.to_string(),
                EnvironmentValue::Secret(SecretRef::env(DOCKER_HUB_PASSWORD)),
            ),
            (
                IMAGE_REPO_NAME.to_string(),
                EnvironmentValue::Plaintext(config.image_repo.clone()),
            ),
            (
                IMAGE_TAG.to_string(),
                EnvironmentValue::Plaintext(config.image_tag.clone()),
            ),
        ]);

        Ok(Self {
            name: name.to_string(),
            compute_type: ComputeType::Small,
            build_image: STANDARD_BUILD_IMAGE.to_string(),
            privileged: true,
            environment,
            buildspec: BuildSpec::for_container(container)?,
        })
    }
}
