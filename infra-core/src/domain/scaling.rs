//! Scaling rule domain types

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AssemblyError, Result};

/// Utilisation signal a scaling rule tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingMetric {
    CpuUtilization,
    MemoryUtilization,
}

impl std::fmt::Display for ScalingMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalingMetric::CpuUtilization => write!(f, "CPUUtilization"),
            ScalingMetric::MemoryUtilization => write!(f, "MemoryUtilization"),
        }
    }
}

/// Target-tracking policy that adjusts a service's replica count
///
/// The rule keeps `metric` near `target_percent` by scaling between
/// `min_capacity` and `max_capacity` replicas. Cooldowns bound how often
/// consecutive adjustments may happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingRule {
    name: String,
    metric: ScalingMetric,
    target_percent: f64,
    scale_in_cooldown_seconds: u64,
    scale_out_cooldown_seconds: u64,
    min_capacity: u32,
    max_capacity: u32,
}

impl ScalingRule {
    /// Creates a rule tracking CPU utilisation
    pub fn cpu(target_percent: f64, max_capacity: u32) -> Self {
        Self::new("CpuScaling", ScalingMetric::CpuUtilization, target_percent, max_capacity)
    }

    /// Creates a rule tracking memory utilisation
    pub fn memory(target_percent: f64, max_capacity: u32) -> Self {
        Self::new(
            "MemoryScaling",
            ScalingMetric::MemoryUtilization,
            target_percent,
            max_capacity,
        )
    }

    fn new(name: &str, metric: ScalingMetric, target_percent: f64, max_capacity: u32) -> Self {
        Self {
            name: name.to_string(),
            metric,
            target_percent,
            scale_in_cooldown_seconds: 0,
            scale_out_cooldown_seconds: 0,
            min_capacity: 1,
            max_capacity,
        }
    }

    /// Sets the scale-in and scale-out cooldowns
    pub fn with_cooldowns(mut self, scale_in: Duration, scale_out: Duration) -> Self {
        self.scale_in_cooldown_seconds = scale_in.as_secs();
        self.scale_out_cooldown_seconds = scale_out.as_secs();
        self
    }

    /// Sets the lower replica bound (defaults to 1)
    pub fn with_min_capacity(mut self, min_capacity: u32) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metric(&self) -> ScalingMetric {
        self.metric
    }

    pub fn target_percent(&self) -> f64 {
        self.target_percent
    }

    pub fn scale_in_cooldown(&self) -> Duration {
        Duration::from_secs(self.scale_in_cooldown_seconds)
    }

    pub fn scale_out_cooldown(&self) -> Duration {
        Duration::from_secs(self.scale_out_cooldown_seconds)
    }

    pub fn min_capacity(&self) -> u32 {
        self.min_capacity
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Validates the rule
    ///
    /// # Errors
    /// Returns an error if:
    /// - The name is blank
    /// - `target_percent` is not in (0, 100]
    /// - `min_capacity` is 0 or greater than `max_capacity`
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AssemblyError::EmptyName("Scaling rule"));
        }

        // Written so that NaN is rejected too
        if !(self.target_percent > 0.0 && self.target_percent <= 100.0) {
            return Err(AssemblyError::out_of_range(
                "target_percent",
                format!("{} is not in (0, 100]", self.target_percent),
            ));
        }

        if self.min_capacity == 0 {
            return Err(AssemblyError::out_of_range(
                "min_capacity",
                "must be at least 1",
            ));
        }

        if self.max_capacity < self.min_capacity {
            return Err(AssemblyError::out_of_range(
                "max_capacity",
                format!(
                    "{} is below min_capacity {}",
                    self.max_capacity, self.min_capacity
                ),
            ));
        }

        Ok(())
    }
}
