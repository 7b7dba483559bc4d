//! Types for the pattern store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata derived from a normalized pattern at registration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternMetadata {
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub complexity_score: f64,
    pub stability_index: f64,
    pub quantum_affinity: f64,
}

/// Result of `PatternMetrics::analyze`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub complexity: f64,
    pub stability: f64,
    pub quantum_affinity: f64,
    /// 1.0 when the mean activation clears the threshold, else 0.0
    pub activation_potential: f64,
}

/// A stored pattern and its metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct StoredPattern {
    pub data: Vec<f64>,
    pub metadata: PatternMetadata,
}
