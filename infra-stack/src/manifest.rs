//! Declaration manifest
//!
//! The assembled stack rendered as JSON for the external provisioning step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stack::FastifyAppStack;

pub const MANIFEST_VERSION: u32 = 1;

/// Rendered stack declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub stack: FastifyAppStack,
}

impl Manifest {
    pub fn new(stack: FastifyAppStack) -> Self {
        Self {
            version: MANIFEST_VERSION,
            generated_at: Utc::now(),
            stack,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a manifest and re-checks the stack with [`FastifyAppStack::validate`]
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        manifest.stack.validate()?;
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_config;
    use crate::error::StackError;
    use crate::props::StackProps;
    use infra_core::AssemblyError;

    fn manifest() -> Manifest {
        let stack = FastifyAppStack::assemble(&sample_config(), &StackProps::default()).unwrap();
        Manifest::new(stack)
    }

    #[test]
    fn test_manifest_json_shape() {
        let json = manifest().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["stack"]["name"], "andreiox-fastify-dev");
        assert_eq!(value["stack"]["service"]["service"]["port"], 3000);
        assert_eq!(
            value["stack"]["pipeline"]["stages"].as_array().map(Vec::len),
            Some(3)
        );
    }

    #[test]
    fn test_manifest_holds_no_secrets() {
        let config = sample_config();
        let json = manifest().to_json().unwrap();

        assert!(!json.contains(config.github_token.expose()));
        assert!(!json.contains(config.registry_password.expose()));
    }

    #[test]
    fn test_parsed_manifest_keeps_artifact_identity() {
        let json = manifest().to_json().unwrap();
        let parsed = Manifest::from_json(&json).unwrap();

        let stages = parsed.stack.pipeline.stages();
        assert_eq!(
            stages[2].actions()[0].input(),
            stages[1].actions()[0].output()
        );
    }

    #[test]
    fn test_tampered_manifest_is_rejected() {
        let json = manifest().to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let stages = value["stack"]["pipeline"]["stages"].as_array_mut().unwrap();
        stages.swap(1, 2);

        let tampered = serde_json::to_string(&value).unwrap();
        assert!(Manifest::from_json(&tampered).is_err());
    }

    fn tampered(edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let json = manifest().to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        edit(&mut value);
        serde_json::to_string(&value).unwrap()
    }

    #[test]
    fn test_out_of_range_scaling_target_is_rejected() {
        let json = tampered(|v| {
            v["stack"]["service"]["service"]["scaling"]["target_percent"] = serde_json::json!(150.0)
        });
        assert!(matches!(
            Manifest::from_json(&json),
            Err(StackError::Assembly(AssemblyError::OutOfRange { name: "target_percent", .. }))
        ));
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let json = tampered(|v| v["stack"]["service"]["service"]["port"] = serde_json::json!(0));
        assert!(matches!(
            Manifest::from_json(&json),
            Err(StackError::Assembly(AssemblyError::OutOfRange { name: "port", .. }))
        ));
    }

    #[test]
    fn test_deploy_to_foreign_service_is_rejected() {
        let json = tampered(|v| {
            v["stack"]["pipeline"]["stages"][2]["actions"][0]["config"]["service"] =
                serde_json::json!("00000000-0000-0000-0000-000000000000")
        });
        assert!(matches!(
            Manifest::from_json(&json),
            Err(StackError::Assembly(AssemblyError::InvalidPipeline(_)))
        ));
    }

    #[test]
    fn test_blank_stack_name_is_rejected() {
        let json = tampered(|v| v["stack"]["name"] = serde_json::json!(""));
        assert!(Manifest::from_json(&json).is_err());
    }
}
