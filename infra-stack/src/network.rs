//! Network and cluster declarations

use infra_core::{AssemblyError, Result};
use serde::{Deserialize, Serialize};

/// Address range used when none is given
pub const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";

/// Isolated virtual network spanning one or more availability zones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vpc {
    pub name: String,
    pub cidr: String,
    pub max_azs: u32,
}

impl Vpc {
    /// Declares a network with the default address range
    pub fn new(name: impl Into<String>, max_azs: u32) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Vpc"));
        }
        if max_azs == 0 {
            return Err(AssemblyError::out_of_range("max_azs", "must be at least 1"));
        }

        Ok(Self {
            name,
            cidr: DEFAULT_VPC_CIDR.to_string(),
            max_azs,
        })
    }
}

/// Container cluster placed in a network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    /// Name of the network the cluster runs in
    pub vpc: String,
}

impl Cluster {
    pub fn new(name: impl Into<String>, vpc: &Vpc) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Cluster"));
        }

        Ok(Self {
            name,
            vpc: vpc.name.clone(),
        })
    }
}
