//! Build contract command handlers
//!
//! Prints the build script and the image definitions file it produces.

use anyhow::{Context, Result};
use infra_stack::buildspec::{BuildSpec, image_definitions};
use infra_stack::config::{IMAGE_REPO_NAME, IMAGE_TAG};

/// Print the buildspec as JSON
pub fn print_buildspec(container: &str) -> Result<()> {
    let spec = BuildSpec::for_container(container)?;
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

/// Print the image definitions for `<repo>:<tag>`
///
/// Repository and tag fall back to the same variables the build reads.
pub fn print_image_definitions(
    container: &str,
    repo: Option<String>,
    tag: Option<String>,
) -> Result<()> {
    let repo = resolve(repo, IMAGE_REPO_NAME)?;
    let tag = resolve(tag, IMAGE_TAG)?;

    println!("{}", image_definitions(container, &repo, &tag)?);
    Ok(())
}

fn resolve(value: Option<String>, variable: &str) -> Result<String> {
    resolve_from(value, variable, |key| std::env::var(key).ok())
}

/// Blank values count as missing, both for flags and variables
fn resolve_from<F>(value: Option<String>, variable: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    value
        .or_else(|| lookup(variable))
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Pass a non-blank value or set {}", variable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_variable() {
        let value = resolve_from(Some("v2".to_string()), IMAGE_TAG, |_| Some("v1".to_string()));
        assert_eq!(value.unwrap(), "v2");
    }

    #[test]
    fn test_falls_back_to_variable() {
        let value = resolve_from(None, IMAGE_TAG, |_| Some("latest".to_string()));
        assert_eq!(value.unwrap(), "latest");
    }

    #[test]
    fn test_blank_is_missing() {
        assert!(resolve_from(Some("  ".to_string()), IMAGE_TAG, |_| None).is_err());
        assert!(resolve_from(None, IMAGE_REPO_NAME, |_| Some(String::new())).is_err());
        assert!(resolve_from(None, IMAGE_REPO_NAME, |_| None).is_err());
    }
}
