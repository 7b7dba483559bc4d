//! # ARIA Quantum
//!
//! The fixed-width processing substrate ARIA projects patterns onto.
//!
//! A normalized pattern becomes one Y rotation per unit (angle = value × π)
//! followed by a nearest-neighbour entanglement chain. The substrate is not a
//! simulator: it keeps an instruction record and a per-unit excitation
//! estimate, and reports depth, width and a readout sequence.

pub mod circuit;
pub mod instruction;

pub use circuit::CircuitSubstrate;
pub use instruction::{Instruction, InstructionKind};

use aria_core::config::AriaConfig;
use aria_core::error::AriaResult;
use aria_core::traits::Substrate;

/// Create the substrate described by the configuration
pub fn create_substrate(config: &AriaConfig) -> AriaResult<Box<dyn Substrate>> {
    let substrate = CircuitSubstrate::from_config(&config.substrate)?;
    tracing::info!(
        "⚛️ Using {} substrate ({} units, readout error {})",
        substrate.name(),
        substrate.width(),
        config.substrate.readout_error_rate
    );
    Ok(Box::new(substrate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_substrate() {
        let config = AriaConfig::default();
        let substrate = create_substrate(&config).unwrap();
        assert_eq!(substrate.width(), 7);
        assert_eq!(substrate.depth(), 0);
    }

    #[test]
    fn test_create_substrate_rejects_bad_width() {
        let mut config = AriaConfig::default();
        config.substrate.width = 0;
        assert!(create_substrate(&config).is_err());
    }
}
