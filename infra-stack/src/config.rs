//! Stack configuration
//!
//! Every externally supplied value the stack needs is gathered into one
//! [`StackConfig`] up front. Assembly takes the config as an argument and never
//! reads the process environment itself.

use crate::error::ConfigError;

pub const AWS_ACCOUNT: &str = "AWS_ACCOUNT";
pub const AWS_REGION: &str = "AWS_REGION";
pub const GITHUB_OWNER: &str = "GITHUB_OWNER";
pub const GITHUB_REPO: &str = "GITHUB_REPO";
pub const GITHUB_BRANCH: &str = "GITHUB_BRANCH";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const DOCKER_HUB_USER: &str = "DOCKER_HUB_USER";
pub const DOCKER_HUB_PASSWORD: &str = "DOCKER_HUB_PASSWORD";
pub const IMAGE_REPO_NAME: &str = "IMAGE_REPO_NAME";
pub const IMAGE_TAG: &str = "IMAGE_TAG";

/// All required variables, in the order they are reported when missing
pub const REQUIRED_VARS: [&str; 10] = [
    AWS_ACCOUNT,
    AWS_REGION,
    GITHUB_OWNER,
    GITHUB_REPO,
    GITHUB_BRANCH,
    GITHUB_TOKEN,
    DOCKER_HUB_USER,
    DOCKER_HUB_PASSWORD,
    IMAGE_REPO_NAME,
    IMAGE_TAG,
];

/// A credential value that never shows up in logs or debug output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(***)")
    }
}

/// Stack configuration
///
/// All values are opaque strings passed through verbatim to the declaration.
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// Target cloud account identifier
    pub account: String,

    /// Target region (e.g., "us-east-1")
    pub region: String,

    /// Owner of the source repository
    pub repo_owner: String,

    /// Name of the source repository
    pub repo_name: String,

    /// Branch the pipeline tracks
    pub branch: String,

    /// OAuth token used by the source action
    pub github_token: Secret,

    /// Container registry user
    pub registry_user: String,

    /// Container registry password
    pub registry_password: Secret,

    /// Image repository the build pushes to
    pub image_repo: String,

    /// Image tag the build pushes
    pub image_tag: String,
}

impl StackConfig {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all required):
    /// - AWS_ACCOUNT, AWS_REGION
    /// - GITHUB_OWNER, GITHUB_REPO, GITHUB_BRANCH, GITHUB_TOKEN
    /// - DOCKER_HUB_USER, DOCKER_HUB_PASSWORD
    /// - IMAGE_REPO_NAME, IMAGE_TAG
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    ///
    /// Blank values count as missing. Every missing variable is reported in a
    /// single error rather than stopping at the first one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |key: &'static str| -> String {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => value,
                _ => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let config = Self {
            account: require(AWS_ACCOUNT),
            region: require(AWS_REGION),
            repo_owner: require(GITHUB_OWNER),
            repo_name: require(GITHUB_REPO),
            branch: require(GITHUB_BRANCH),
            github_token: Secret::new(require(GITHUB_TOKEN)),
            registry_user: require(DOCKER_HUB_USER),
            registry_password: Secret::new(require(DOCKER_HUB_PASSWORD)),
            image_repo: require(IMAGE_REPO_NAME),
            image_tag: require(IMAGE_TAG),
        };

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(config)
    }

    /// Full image reference the build produces, `<repo>:<tag>`
    pub fn image_uri(&self) -> String {
        format!("{}:{}", self.image_repo, self.image_tag)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn sample_vars() -> HashMap<&'static str, String> {
        HashMap::from([
            (AWS_ACCOUNT, "123456789012".to_string()),
            (AWS_REGION, "us-east-1".to_string()),
            (GITHUB_OWNER, "andreiox".to_string()),
            (GITHUB_REPO, "fastify-test-drive".to_string()),
            (GITHUB_BRANCH, "master".to_string()),
            (GITHUB_TOKEN, "ghp_token".to_string()),
            (DOCKER_HUB_USER, "andreiox".to_string()),
            (DOCKER_HUB_PASSWORD, "hunter2".to_string()),
            (IMAGE_REPO_NAME, "andreiox/fastify-test-drive".to_string()),
            (IMAGE_TAG, "latest".to_string()),
        ])
    }

    pub(crate) fn sample_config() -> StackConfig {
        let vars = sample_vars();
        StackConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_from_lookup() {
        let config = sample_config();
        assert_eq!(config.account, "123456789012");
        assert_eq!(config.branch, "master");
        assert_eq!(config.github_token.expose(), "ghp_token");
        assert_eq!(config.image_uri(), "andreiox/fastify-test-drive:latest");
    }

    #[test]
    fn test_reports_every_missing_variable() {
        let result = StackConfig::from_lookup(|_| None);
        assert_eq!(result.unwrap_err(), ConfigError::Missing(REQUIRED_VARS.to_vec()));
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let mut vars = sample_vars();
        vars.insert(GITHUB_BRANCH, "   ".to_string());
        vars.remove(IMAGE_TAG);

        let result = StackConfig::from_lookup(|key| vars.get(key).cloned());
        let err = result.unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec![GITHUB_BRANCH, IMAGE_TAG]));
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: GITHUB_BRANCH, IMAGE_TAG"
        );
    }

    #[test]
    fn test_secrets_are_redacted() {
        let config = sample_config();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("ghp_token"));
        assert!(debug.contains("Secret(***)"));
    }
}
