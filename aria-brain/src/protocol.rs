//! # Core Protocol - Patterns Through the Substrate
//!
//! Owns one substrate and a raw pattern registry, and drives
//! initialize → register → process → status.
//!
//! The registry here keeps patterns as given and silently overwrites on
//! re-registration. `PatternMetrics` keeps its own normalized store and
//! rejects duplicates; the two are deliberately not unified.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use aria_core::config::AriaConfig;
use aria_core::error::{AriaError, AriaResult};
use aria_core::traits::{Substrate, SubstrateStats};
use aria_quantum::{create_substrate, CircuitSubstrate};

// ============================================================================
// TYPES
// ============================================================================

/// Protocol lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolState {
    Standby,
    Initialized,
}

impl fmt::Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolState::Standby => write!(f, "standby"),
            ProtocolState::Initialized => write!(f, "initialized"),
        }
    }
}

/// Output of `process_pattern`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub pattern_id: String,
    /// Readout sequence from the substrate
    pub quantum_state: Vec<f64>,
    pub circuit_depth: usize,
    pub circuit_width: usize,
}

/// Read-only snapshot of the protocol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub initialized: bool,
    pub current_state: ProtocolState,
    pub registered_patterns: usize,
    pub substrate: SubstrateStats,
}

// ============================================================================
// CORE PROTOCOL
// ============================================================================

pub struct CoreProtocol {
    /// Substrate patterns are projected onto
    substrate: Box<dyn Substrate>,

    /// Raw patterns by id (last registration wins)
    patterns: HashMap<String, Vec<f64>>,

    state: ProtocolState,
}

impl CoreProtocol {
    /// Protocol over a default-width circuit substrate
    pub fn new() -> AriaResult<Self> {
        Ok(Self::with_substrate(Box::new(CircuitSubstrate::default())))
    }

    /// Protocol over the substrate described by the configuration
    pub fn with_config(config: &AriaConfig) -> AriaResult<Self> {
        Ok(Self::with_substrate(create_substrate(config)?))
    }

    /// Protocol over a pre-built substrate
    pub fn with_substrate(substrate: Box<dyn Substrate>) -> Self {
        Self {
            substrate,
            patterns: HashMap::new(),
            state: ProtocolState::Standby,
        }
    }

    /// Prepare the substrate and open the registry
    pub fn initialize_system(&mut self) -> AriaResult<()> {
        self.substrate.initialize_state(None)?;
        self.state = ProtocolState::Initialized;

        tracing::info!(
            "🚀 Core protocol initialized ({} substrate, {} units)",
            self.substrate.name(),
            self.substrate.width()
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state == ProtocolState::Initialized
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// Store a raw pattern, replacing any previous one under the same id
    pub fn register_neural_pattern(&mut self, id: &str, pattern: &[f64]) -> AriaResult<()> {
        if !self.is_initialized() {
            return Err(AriaError::NotReady(
                "system must be initialized before registering patterns".to_string(),
            ));
        }

        if self.patterns.insert(id.to_string(), pattern.to_vec()).is_some() {
            tracing::debug!("Pattern {} replaced", id);
        }
        Ok(())
    }

    pub fn contains_pattern(&self, id: &str) -> bool {
        self.patterns.contains_key(id)
    }

    /// Reset the substrate, apply the pattern, measure
    pub fn process_pattern(&mut self, id: &str) -> AriaResult<ProcessingResult> {
        let pattern = self.patterns.get(id).ok_or_else(|| AriaError::not_found(id))?;

        self.substrate.reset();
        self.substrate.apply_pattern(pattern)?;
        let quantum_state = self.substrate.measure();

        let result = ProcessingResult {
            pattern_id: id.to_string(),
            quantum_state,
            circuit_depth: self.substrate.depth(),
            circuit_width: self.substrate.width(),
        };

        tracing::debug!(
            "⚛️ Pattern {} processed (depth {}, {} readouts)",
            id,
            result.circuit_depth,
            result.quantum_state.len()
        );
        Ok(result)
    }

    pub fn get_system_status(&self) -> SystemStatus {
        SystemStatus {
            initialized: self.is_initialized(),
            current_state: self.state,
            registered_patterns: self.patterns.len(),
            substrate: self.substrate.stats(),
        }
    }
}
