//! Load-balanced service declaration

use infra_core::{ScalingRule, ServiceDescriptor};
use serde::{Deserialize, Serialize};

use crate::network::Cluster;

/// Internet-facing load balancer in front of the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub public: bool,
    pub listener_port: u16,
    /// Port traffic is forwarded to on each task
    pub target_port: u16,
}

/// Container service registered behind a load balancer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancedService {
    /// Cluster the service runs in
    pub cluster: String,
    pub load_balancer: LoadBalancer,
    pub service: ServiceDescriptor,
}

impl LoadBalancedService {
    /// Places `service` in `cluster` behind a public HTTP listener
    pub fn new(cluster: &Cluster, service: ServiceDescriptor) -> Self {
        let load_balancer = LoadBalancer {
            public: true,
            listener_port: 80,
            target_port: service.port(),
        };

        Self {
            cluster: cluster.name.clone(),
            load_balancer,
            service,
        }
    }

    /// Binds the autoscaling rule of the underlying service
    pub fn auto_scale(&mut self, rule: ScalingRule) -> infra_core::Result<()> {
        self.service.attach_scaling_rule(rule)
    }
}
