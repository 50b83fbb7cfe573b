//! Build step contract
//!
//! The build stage authenticates to the registry, builds and pushes
//! `<repo>:<tag>`, then writes a one-element JSON array naming the container
//! and the pushed image to [`IMAGE_DEFINITIONS_FILE`]. The deploy stage reads
//! that file to decide which image to roll out, so its bytes must match
//! [`image_definitions`] exactly.

use infra_core::{AssemblyError, Result};
use serde::{Deserialize, Serialize};

use crate::config::{DOCKER_HUB_PASSWORD, DOCKER_HUB_USER, IMAGE_REPO_NAME, IMAGE_TAG};

/// File the build writes and the deploy action reads
pub const IMAGE_DEFINITIONS_FILE: &str = "imagedefinitions.json";

/// Buildspec schema version
pub const BUILDSPEC_VERSION: &str = "0.2";

/// One entry of the image definitions file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDefinition {
    pub name: String,
    #[serde(rename = "imageUri")]
    pub image_uri: String,
}

/// Renders the image definitions file content
///
/// # Example
/// ```
/// let json = infra_stack::buildspec::image_definitions("fastify-app", "andreiox/app", "v1")?;
/// assert_eq!(json, r#"[{"name":"fastify-app","imageUri":"andreiox/app:v1"}]"#);
/// # Ok::<(), infra_core::AssemblyError>(())
/// ```
///
/// # Errors
/// Fails if the container name is unsafe, or `repo` or `tag` is blank.
pub fn image_definitions(container: &str, repo: &str, tag: &str) -> Result<String> {
    check_container_name(container)?;
    if repo.trim().is_empty() {
        return Err(AssemblyError::MissingValue("repo"));
    }
    if tag.trim().is_empty() {
        return Err(AssemblyError::MissingValue("tag"));
    }
    Ok(render_definitions(container, &format!("{}:{}", repo, tag)))
}

fn render_definitions(container: &str, image_uri: &str) -> String {
    let definitions = [ImageDefinition {
        name: container.to_string(),
        image_uri: image_uri.to_string(),
    }];
    // Serialising a slice of plain string structs cannot fail
    serde_json::to_string(&definitions).unwrap_or_default()
}

/// Container names end up inside a single-quoted shell argument, so only
/// letters, digits, hyphens and underscores are allowed.
fn check_container_name(container: &str) -> Result<()> {
    if container.is_empty() {
        return Err(AssemblyError::EmptyName("Container"));
    }

    let valid = container.len() <= 255
        && container
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(AssemblyError::out_of_range(
            "container_name",
            format!(
                "'{}' may only contain letters, digits, hyphens and underscores (max 255)",
                container
            ),
        ));
    }

    Ok(())
}

/// Commands run in one build phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub commands: Vec<String>,
}

impl Phase {
    fn new(commands: &[String]) -> Self {
        Self {
            commands: commands.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phases {
    pub pre_build: Phase,
    pub build: Phase,
    pub post_build: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifacts {
    pub files: Vec<String>,
}

/// Build script run by the build stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    pub version: String,
    pub phases: Phases,
    pub artifacts: Artifacts,
}

impl BuildSpec {
    /// Build script that publishes an image for `container`
    ///
    /// Registry credentials, repository and tag are read from the build
    /// environment at run time, so the script itself holds no values.
    pub fn for_container(container: &str) -> Result<Self> {
        check_container_name(container)?;

        let image = format!("${}:${}", IMAGE_REPO_NAME, IMAGE_TAG);
        let definitions = render_definitions(container, "%s");

        let pre_build = [
            "echo Logging in to Docker Hub...".to_string(),
            format!(
                "echo \"${}\" | docker login --username \"${}\" --password-stdin",
                DOCKER_HUB_PASSWORD, DOCKER_HUB_USER
            ),
        ];
        let build = [
            "echo Building the image on `date`".to_string(),
            format!("docker build -t \"{}\" .", image),
        ];
        let post_build = [
            format!("docker push \"{}\"", image),
            format!(
                "printf '{}' \"{}\" > {}",
                definitions, image, IMAGE_DEFINITIONS_FILE
            ),
        ];

        Ok(Self {
            version: BUILDSPEC_VERSION.to_string(),
            phases: Phases {
                pre_build: Phase::new(&pre_build),
                build: Phase::new(&build),
                post_build: Phase::new(&post_build),
            },
            artifacts: Artifacts {
                files: vec![IMAGE_DEFINITIONS_FILE.to_string()],
            },
        })
    }
}
