//! Service descriptor domain types
//!
//! Describes a replicated, network-exposed container process and the single
//! scaling rule bound to it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::scaling::ScalingRule;
use crate::error::{AssemblyError, Result};

/// Identity of a declared service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(Uuid);

impl ServiceId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared shape of a long-running containerised process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    id: ServiceId,
    name: String,
    container_name: String,
    image: String,
    port: u16,
    desired_replicas: u32,
    scaling: Option<ScalingRule>,
}

impl ServiceDescriptor {
    /// Creates a new service descriptor
    ///
    /// # Arguments
    /// * `name` - Logical name of the service
    /// * `container_name` - Name of the container inside the task
    /// * `image` - Image reference, e.g. `owner/image:tag`
    /// * `port` - Container listening port, in 1..=65535
    /// * `desired_replicas` - Initial number of running tasks; 0 declares a
    ///   stopped service
    ///
    /// # Errors
    /// Returns an error if the port is out of range, or a name or the image
    /// is blank.
    pub fn new(
        name: impl Into<String>,
        container_name: impl Into<String>,
        image: impl Into<String>,
        port: u32,
        desired_replicas: u32,
    ) -> Result<Self> {
        let name = name.into();
        let container_name = container_name.into();
        let image = image.into();

        if name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Service"));
        }
        if container_name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Container"));
        }
        if image.trim().is_empty() {
            return Err(AssemblyError::MissingValue("image"));
        }

        let port = u16::try_from(port)
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| {
                AssemblyError::out_of_range("port", format!("{} is not in 1..=65535", port))
            })?;

        Ok(Self {
            id: ServiceId::new(),
            name,
            container_name,
            image,
            port,
            desired_replicas,
            scaling: None,
        })
    }

    /// Binds a scaling rule to this service
    ///
    /// Only one rule may be attached, and it is validated first.
    pub fn attach_scaling_rule(&mut self, rule: ScalingRule) -> Result<()> {
        if self.scaling.is_some() {
            return Err(AssemblyError::ScalingRuleAlreadyAttached(self.name.clone()));
        }

        rule.validate()?;

        tracing::debug!(
            "Attached {} scaling rule to '{}' (target {}%, max {})",
            rule.metric(),
            self.name,
            rule.target_percent(),
            rule.max_capacity()
        );

        self.scaling = Some(rule);
        Ok(())
    }

    /// Re-checks a descriptor that was not built through [`ServiceDescriptor::new`],
    /// e.g. one read back from a manifest
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Service"));
        }
        if self.container_name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Container"));
        }
        if self.image.trim().is_empty() {
            return Err(AssemblyError::MissingValue("image"));
        }
        if self.port == 0 {
            return Err(AssemblyError::out_of_range("port", "0 is not in 1..=65535"));
        }
        if let Some(rule) = &self.scaling {
            rule.validate()?;
        }
        Ok(())
    }

    pub fn id(&self) -> ServiceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn desired_replicas(&self) -> u32 {
        self.desired_replicas
    }

    pub fn scaling_rule(&self) -> Option<&ScalingRule> {
        self.scaling.as_ref()
    }
}
