//! # Circuit Substrate
//!
//! A fixed-width register that records every operation as an instruction.
//!
//! ## Depth
//!
//! Instructions are layered as soon as possible: each one lands one layer
//! above the deepest unit it touches. Rotations on distinct units share a
//! layer, while the entanglement chain is strictly sequential.
//!
//! ## Readout
//!
//! There are no amplitudes here. Each unit carries the probability of being
//! read as excited, and every instruction yields the value of the unit it
//! wrote. `measure` returns the readout of the whole record.

use std::f64::consts::PI;

use aria_core::config::SubstrateConfig;
use aria_core::error::{AriaError, AriaResult};
use aria_core::traits::{Substrate, SubstrateStats};

use crate::instruction::{
    entangled_excitation, noisy_readout, rotation_excitation, Instruction, InstructionKind,
};

/// Circuit-model substrate
#[derive(Clone, Debug)]
pub struct CircuitSubstrate {
    /// Unit count, fixed at construction
    width: usize,

    /// Readout error applied by `Measure`
    readout_error_rate: f64,

    /// Applied operations since the last reset
    instructions: Vec<Instruction>,

    /// One readout per instruction
    readouts: Vec<f64>,

    /// Deepest layer reached on each unit
    layers: Vec<usize>,

    /// Excitation probability per unit
    excitation: Vec<f64>,
}

impl Default for CircuitSubstrate {
    /// Empty substrate of the default width with the default readout error
    fn default() -> Self {
        Self::with_validated(&SubstrateConfig::default())
    }
}

impl CircuitSubstrate {
    /// Create an empty substrate of the given width
    pub fn new(width: usize) -> AriaResult<Self> {
        Self::from_config(&SubstrateConfig {
            width,
            ..SubstrateConfig::default()
        })
    }

    /// Create a substrate from configuration
    pub fn from_config(config: &SubstrateConfig) -> AriaResult<Self> {
        config.validate()?;
        Ok(Self::with_validated(config))
    }

    fn with_validated(config: &SubstrateConfig) -> Self {
        Self {
            width: config.width,
            readout_error_rate: config.readout_error_rate,
            instructions: Vec::new(),
            readouts: Vec::new(),
            layers: vec![0; config.width],
            excitation: vec![0.0; config.width],
        }
    }

    /// Instructions recorded since the last reset
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Kinds of the recorded instructions, in order
    pub fn instruction_kinds(&self) -> Vec<InstructionKind> {
        self.instructions.iter().map(Instruction::kind).collect()
    }

    /// Current excitation probability per unit
    pub fn excitation(&self) -> &[f64] {
        &self.excitation
    }

    fn record(&mut self, instruction: Instruction, readout: f64) {
        let units = instruction.units(self.width);
        let layer = units.iter().map(|&u| self.layers[u]).max().unwrap_or(0) + 1;
        for u in units {
            self.layers[u] = layer;
        }

        self.instructions.push(instruction);
        self.readouts.push(readout);
    }

    fn check_width(&self, values: &[f64]) -> AriaResult<()> {
        if values.len() != self.width {
            return Err(AriaError::dimension(self.width, values.len()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AriaError::degenerate("non-finite value in substrate input"));
        }
        Ok(())
    }
}

impl Substrate for CircuitSubstrate {
    fn initialize_state(&mut self, amplitudes: Option<&[f64]>) -> AriaResult<()> {
        match amplitudes {
            None => {
                for unit in 0..self.width {
                    self.excitation[unit] = 0.5;
                    self.record(Instruction::Hadamard { unit }, 0.5);
                }
            }
            Some(amplitudes) => {
                self.check_width(amplitudes)?;

                for (e, a) in self.excitation.iter_mut().zip(amplitudes) {
                    *e = (a * a).clamp(0.0, 1.0);
                }
                let mean = self.excitation.iter().sum::<f64>() / self.width as f64;
                self.record(
                    Instruction::LoadState {
                        amplitudes: amplitudes.to_vec(),
                    },
                    mean,
                );
            }
        }

        tracing::debug!("⚛️ State prepared on {} units (depth {})", self.width, self.depth());
        Ok(())
    }

    fn apply_pattern(&mut self, pattern: &[f64]) -> AriaResult<()> {
        self.check_width(pattern)?;

        // All rotations first...
        for (unit, value) in pattern.iter().enumerate() {
            let theta = value * PI;
            let excited = rotation_excitation(theta);
            self.excitation[unit] = excited;
            self.record(Instruction::RotationY { unit, theta }, excited);
        }

        // ...then the entanglement chain
        for control in 0..self.width - 1 {
            let target = control + 1;
            let excited = entangled_excitation(self.excitation[control], self.excitation[target]);
            self.excitation[target] = excited;
            self.record(Instruction::Entangle { control, target }, excited);
        }

        Ok(())
    }

    fn measure(&mut self) -> Vec<f64> {
        for unit in 0..self.width {
            let readout = noisy_readout(self.excitation[unit], self.readout_error_rate);
            self.record(Instruction::Measure { unit }, readout);
        }

        self.readouts.clone()
    }

    fn reset(&mut self) {
        self.instructions.clear();
        self.readouts.clear();
        self.layers.iter_mut().for_each(|l| *l = 0);
        self.excitation.iter_mut().for_each(|e| *e = 0.0);
    }

    fn depth(&self) -> usize {
        self.layers.iter().copied().max().unwrap_or(0)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn stats(&self) -> SubstrateStats {
        SubstrateStats {
            width: self.width,
            depth: self.depth(),
            instruction_count: self.instructions.len(),
        }
    }

    fn name(&self) -> &'static str {
        "Circuit"
    }
}
