//! Infra Core
//!
//! Core declaration types for the fastify-infra stack.
//!
//! This crate contains:
//! - Domain types: artifacts, actions, stages, pipelines, service descriptors
//!   and scaling rules
//! - The stage chain builder that assembles a linear source → build → deploy
//!   pipeline
//! - Assembly errors
//!
//! Nothing here talks to a cloud provider: the types describe a static
//! declaration that is rendered and handed to an external provisioning engine.

pub mod chain;
pub mod domain;
pub mod error;

pub use chain::StageChain;
pub use domain::action::{Action, ActionConfig, ActionKind, GitHubTrigger};
pub use domain::artifact::Artifact;
pub use domain::pipeline::Pipeline;
pub use domain::scaling::{ScalingMetric, ScalingRule};
pub use domain::secret::SecretRef;
pub use domain::service::{ServiceDescriptor, ServiceId};
pub use domain::stage::{Stage, StageId, StageRef};
pub use error::{AssemblyError, Result};
