//! # Instructions - What the Circuit Records
//!
//! Every operation applied to the substrate is kept as an `Instruction`.
//! Depth and the measurement readout are both derived from this record.

use serde::{Deserialize, Serialize};

/// One recorded operation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Put a unit into uniform superposition
    Hadamard { unit: usize },

    /// Load an explicit per-unit state across the whole register
    LoadState { amplitudes: Vec<f64> },

    /// Rotate a unit about the Y axis
    RotationY { unit: usize, theta: f64 },

    /// Link two neighbouring units (control -> target)
    Entangle { control: usize, target: usize },

    /// Read a unit into its classical slot
    Measure { unit: usize },
}

/// Instruction kind without parameters (for ordering checks)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionKind {
    Hadamard,
    LoadState,
    RotationY,
    Entangle,
    Measure,
}

impl Instruction {
    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Hadamard { .. } => InstructionKind::Hadamard,
            Instruction::LoadState { .. } => InstructionKind::LoadState,
            Instruction::RotationY { .. } => InstructionKind::RotationY,
            Instruction::Entangle { .. } => InstructionKind::Entangle,
            Instruction::Measure { .. } => InstructionKind::Measure,
        }
    }

    /// Units this instruction touches
    ///
    /// `LoadState` spans the full register, so the caller passes the width.
    pub fn units(&self, width: usize) -> Vec<usize> {
        match self {
            Instruction::Hadamard { unit }
            | Instruction::RotationY { unit, .. }
            | Instruction::Measure { unit } => vec![*unit],
            Instruction::Entangle { control, target } => vec![*control, *target],
            Instruction::LoadState { .. } => (0..width).collect(),
        }
    }
}

/// Probability of reading a unit as excited after `RotationY(theta)` from rest
#[inline]
pub fn rotation_excitation(theta: f64) -> f64 {
    let half = (theta / 2.0).sin();
    half * half
}

/// Excitation of the target after linking: it flips when the control is excited
#[inline]
pub fn entangled_excitation(control: f64, target: f64) -> f64 {
    control * (1.0 - target) + (1.0 - control) * target
}

/// Symmetric readout error: each outcome flips with probability `error_rate`
#[inline]
pub fn noisy_readout(p: f64, error_rate: f64) -> f64 {
    p * (1.0 - 2.0 * error_rate) + error_rate
}
