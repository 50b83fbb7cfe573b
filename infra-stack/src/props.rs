//! Stack properties
//!
//! Fixed shape of the application stack. Unlike [`StackConfig`](crate::config::StackConfig),
//! these values are part of the declaration itself and have sensible defaults.

use std::time::Duration;

/// Shape of the application stack
#[derive(Debug, Clone)]
pub struct StackProps {
    /// Stack identifier
    pub stack_name: String,

    /// Number of availability zones the network spans
    pub max_azs: u32,

    /// Container name inside the task definition
    pub container_name: String,

    /// Image the service starts from before the first pipeline run
    pub image: String,

    /// Port the container listens on
    pub container_port: u32,

    /// Initial number of tasks
    pub desired_replicas: u32,

    /// CPU utilisation the scaling rule tracks
    pub cpu_target_percent: f64,

    pub scale_in_cooldown: Duration,

    pub scale_out_cooldown: Duration,

    /// Upper bound on running tasks
    pub max_capacity: u32,

    /// Name of the delivery pipeline
    pub pipeline_name: String,

    /// Name of the build project
    pub build_project_name: String,
}

impl Default for StackProps {
    fn default() -> Self {
        Self {
            stack_name: "andreiox-fastify-dev".to_string(),
            max_azs: 2,
            container_name: "fastify-app".to_string(),
            image: "andreiox/fastify-test-drive".to_string(),
            container_port: 3000,
            desired_replicas: 1,
            cpu_target_percent: 70.0,
            scale_in_cooldown: Duration::from_secs(60),
            scale_out_cooldown: Duration::from_secs(60),
            max_capacity: 2,
            pipeline_name: "fastify-app-pipeline".to_string(),
            build_project_name: "fastify-app-build".to_string(),
        }
    }
}

impl StackProps {
    /// Overrides the stack name
    pub fn with_stack_name(mut self, stack_name: impl Into<String>) -> Self {
        self.stack_name = stack_name.into();
        self
    }
}
