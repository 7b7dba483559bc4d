//! Types for the autonomous control loop

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operating state of the autonomous system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemState {
    Initializing,
    Standby,
    Active,
    Processing,
    Optimizing,
    Error,
}

impl SystemState {
    pub fn name(&self) -> &'static str {
        match self {
            SystemState::Initializing => "initializing",
            SystemState::Standby => "standby",
            SystemState::Active => "active",
            SystemState::Processing => "processing",
            SystemState::Optimizing => "optimizing",
            SystemState::Error => "error",
        }
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One record per processing call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub timestamp: DateTime<Utc>,
    /// Mean of the results
    pub processing_load: f64,
    /// Mean absolute value of the results
    pub quantum_utilization: f64,
    /// Fraction of results above the accuracy cutoff
    pub pattern_accuracy: f64,
    /// Synthetic cost in seconds (length × unit cost)
    pub response_time: f64,
}

/// Returned by `process_quantum_results`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub processing_efficiency: f64,
    pub quantum_utilization: f64,
    pub pattern_accuracy: f64,
}

/// Returned by `optimize_performance`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Mean recent accuracy (0.0 when there is no history)
    pub optimization_status: f64,
    /// Threshold after adaptation; absent when there was nothing to analyze
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_threshold: Option<f64>,
}
