//! # Traits - Abstractions for ARIA's Components
//!
//! The substrate is a capability, not a concrete type. CoreProtocol drives
//! whatever implements `Substrate`, so the circuit model can be replaced by
//! a test double without touching the protocol.

use serde::{Deserialize, Serialize};

use crate::error::AriaResult;

/// Substrate trait - the fixed-width processing unit
///
/// Implementations record the operations applied to them and report
/// structural descriptors of that record.
pub trait Substrate: Send {
    /// Prepare the initial state
    ///
    /// `None` puts every unit into uniform superposition; `Some` loads an
    /// explicit per-unit state whose length must equal `width()`.
    fn initialize_state(&mut self, amplitudes: Option<&[f64]>) -> AriaResult<()>;

    /// Apply a normalized pattern (length must equal `width()`)
    fn apply_pattern(&mut self, pattern: &[f64]) -> AriaResult<()>;

    /// Measure every unit and return the result sequence
    ///
    /// The result has at least `width()` elements.
    fn measure(&mut self) -> Vec<f64>;

    /// Clear everything applied so far, keeping the width
    fn reset(&mut self);

    /// Number of ordering-dependent layers recorded
    fn depth(&self) -> usize;

    /// Fixed unit count
    fn width(&self) -> usize;

    /// Get current statistics
    fn stats(&self) -> SubstrateStats {
        SubstrateStats {
            width: self.width(),
            depth: self.depth(),
            instruction_count: 0,
        }
    }

    /// Name of this substrate (for logging)
    fn name(&self) -> &'static str;
}

/// Statistics from the substrate
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstrateStats {
    /// Unit count
    pub width: usize,

    /// Layer count
    pub depth: usize,

    /// Instructions recorded since the last reset
    pub instruction_count: usize,
}
