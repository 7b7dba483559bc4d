//! # Configuration - ARIA's Operating Parameters
//!
//! These parameters define the substrate geometry, how patterns are scored,
//! and how the autonomous loop adapts its acceptance threshold.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AriaError, AriaResult};

/// Master configuration for ARIA
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AriaConfig {
    /// Substrate geometry and readout
    pub substrate: SubstrateConfig,

    /// Pattern scoring settings
    pub patterns: PatternConfig,

    /// Autonomous control loop settings
    pub autonomous: AutonomousConfig,
}

/// Substrate geometry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubstrateConfig {
    /// Number of processing units (qubits)
    pub width: usize,

    /// Symmetric readout error applied at measurement
    pub readout_error_rate: f64,
}

impl Default for SubstrateConfig {
    fn default() -> Self {
        Self {
            width: crate::MAX_QUBITS,
            readout_error_rate: crate::DEFAULT_ERROR_RATE,
        }
    }
}

/// Pattern scoring
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Mean activation above which a pattern is considered active
    pub activation_threshold: f64,

    /// Multiplier applied to sub-threshold elements by `optimize`
    pub sub_threshold_damping: f64,

    /// Offset inside log2 so zero elements don't produce -inf
    pub entropy_epsilon: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            activation_threshold: crate::DEFAULT_ACTIVATION_THRESHOLD,
            sub_threshold_damping: 0.5,
            entropy_epsilon: 1e-10,
        }
    }
}

/// Autonomous control loop
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutonomousConfig {
    /// Starting acceptance bound for recent accuracy
    pub optimization_threshold: f64,

    /// Factor applied to the threshold when accuracy falls short
    pub threshold_decay: f64,

    /// Number of recent records considered by `optimize_performance`
    pub optimization_window: usize,

    /// A result element counts as accurate above this value
    pub accuracy_cutoff: f64,

    /// Synthetic cost per result element (seconds)
    pub unit_response_time: f64,

    /// Response time budget before a warning is logged
    pub max_response_time_ms: u64,

    /// Keep at most this many metrics records (None = unbounded)
    pub history_limit: Option<usize>,
}

impl Default for AutonomousConfig {
    fn default() -> Self {
        Self {
            optimization_threshold: crate::DEFAULT_OPTIMIZATION_THRESHOLD,
            threshold_decay: 0.95,
            optimization_window: 10,
            accuracy_cutoff: 0.5,
            unit_response_time: 0.001,
            max_response_time_ms: crate::MAX_RESPONSE_TIME_MS,
            history_limit: None,
        }
    }
}

impl AriaConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AriaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> AriaResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - ARIA_WIDTH: Substrate width (default: 7)
    /// - ARIA_READOUT_ERROR: Readout error rate (default: 0.001)
    /// - ARIA_ACTIVATION_THRESHOLD: Pattern activation threshold (default: 0.75)
    /// - ARIA_OPTIMIZATION_THRESHOLD: Starting optimization threshold (default: 0.85)
    /// - ARIA_HISTORY_LIMIT: Metrics history cap (default: unbounded)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parse("ARIA_WIDTH") {
            config.substrate.width = v;
        }
        if let Some(v) = env_parse("ARIA_READOUT_ERROR") {
            config.substrate.readout_error_rate = v;
        }
        if let Some(v) = env_parse("ARIA_ACTIVATION_THRESHOLD") {
            config.patterns.activation_threshold = v;
        }
        if let Some(v) = env_parse("ARIA_OPTIMIZATION_THRESHOLD") {
            config.autonomous.optimization_threshold = v;
        }
        if let Some(v) = env_parse("ARIA_HISTORY_LIMIT") {
            config.autonomous.history_limit = Some(v);
        }

        config
    }

    /// Check every section for values the components cannot work with
    pub fn validate(&self) -> AriaResult<()> {
        self.substrate.validate()?;
        self.patterns.validate()?;
        self.autonomous.validate()
    }
}

impl SubstrateConfig {
    pub fn validate(&self) -> AriaResult<()> {
        if self.width < 1 {
            return Err(AriaError::config("substrate width must be at least 1"));
        }
        if self.width > crate::MAX_SUBSTRATE_WIDTH {
            return Err(AriaError::config(format!(
                "substrate width {} exceeds {}",
                self.width,
                crate::MAX_SUBSTRATE_WIDTH
            )));
        }
        if !(0.0..0.5).contains(&self.readout_error_rate) {
            return Err(AriaError::config(format!(
                "readout error rate {} outside [0, 0.5)",
                self.readout_error_rate
            )));
        }
        Ok(())
    }
}

impl PatternConfig {
    pub fn validate(&self) -> AriaResult<()> {
        if !in_unit_interval(self.activation_threshold) {
            return Err(AriaError::config(format!(
                "activation threshold {} outside (0, 1]",
                self.activation_threshold
            )));
        }
        if !in_unit_interval(self.sub_threshold_damping) {
            return Err(AriaError::config(format!(
                "sub-threshold damping {} outside (0, 1]",
                self.sub_threshold_damping
            )));
        }
        if !(self.entropy_epsilon > 0.0 && self.entropy_epsilon.is_finite()) {
            return Err(AriaError::config("entropy epsilon must be positive"));
        }
        Ok(())
    }
}

impl AutonomousConfig {
    pub fn validate(&self) -> AriaResult<()> {
        if !in_unit_interval(self.optimization_threshold) {
            return Err(AriaError::config(format!(
                "optimization threshold {} outside (0, 1]",
                self.optimization_threshold
            )));
        }
        if !in_unit_interval(self.threshold_decay) {
            return Err(AriaError::config(format!(
                "threshold decay {} outside (0, 1]",
                self.threshold_decay
            )));
        }
        if self.optimization_window == 0 {
            return Err(AriaError::config("optimization window must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.accuracy_cutoff) {
            return Err(AriaError::config(format!(
                "accuracy cutoff {} outside [0, 1]",
                self.accuracy_cutoff
            )));
        }
        if !(self.unit_response_time >= 0.0 && self.unit_response_time.is_finite()) {
            return Err(AriaError::config(format!(
                "unit response time {} must be finite and non-negative",
                self.unit_response_time
            )));
        }
        if self.history_limit == Some(0) {
            return Err(AriaError::config("history limit must be at least 1"));
        }
        Ok(())
    }
}

fn in_unit_interval(v: f64) -> bool {
    v > 0.0 && v <= 1.0
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
