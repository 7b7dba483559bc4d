//! # ARIA Core
//!
//! Core types and traits for ARIA - Advanced Recursive Intelligence Architecture.
//!
//! This crate provides the shared building blocks:
//! - **AriaError**: The error kinds every component reports
//! - **AriaConfig**: Substrate, pattern and autonomous-loop parameters
//! - **Substrate**: The capability CoreProtocol drives patterns through
//!
//! Components never share state by reference. Patterns, results and metrics
//! cross crate boundaries by value.

pub mod config;
pub mod error;
pub mod traits;

// Re-export main types at crate root
pub use config::{AriaConfig, AutonomousConfig, PatternConfig, SubstrateConfig};
pub use error::{AriaError, AriaResult};
pub use traits::*;

/// Default substrate width
pub const MAX_QUBITS: usize = 7;

/// Largest width a substrate may be configured with
pub const MAX_SUBSTRATE_WIDTH: usize = 1024;

/// Default symmetric readout error
pub const DEFAULT_ERROR_RATE: f64 = 0.001;

/// Default mean activation above which a pattern is active
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.75;

/// Starting acceptance bound of the autonomous loop
pub const DEFAULT_OPTIMIZATION_THRESHOLD: f64 = 0.85;

/// Response time budget per processing call
pub const MAX_RESPONSE_TIME_MS: u64 = 10;
