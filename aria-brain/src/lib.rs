//! # ARIA Brain
//!
//! The closed loop around the substrate:
//!
//! - **PatternMetrics**: normalizes patterns and scores complexity,
//!   stability and quantum affinity
//! - **CoreProtocol**: registers raw patterns and projects them through the
//!   substrate
//! - **AutonomousSystem**: monitors result arrays and adapts its
//!   optimization threshold
//!
//! None of the three share state. A caller moves patterns and results
//! between them by value:
//!
//! ```text
//! raw ──▶ PatternMetrics ──optimize──▶ CoreProtocol ──results──▶ AutonomousSystem
//! ```
//!
//! Each component assumes a single owner. Wrap it in a lock if several
//! threads need it.

pub mod autonomous;
pub mod patterns;
pub mod protocol;

pub use autonomous::{
    AutonomousSystem, OptimizationReport, ProcessingReport, SystemMetrics, SystemState,
};
pub use patterns::{PatternAnalysis, PatternMetadata, PatternMetrics};
pub use protocol::{CoreProtocol, ProcessingResult, ProtocolState, SystemStatus};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_closed_loop() {
        let mut rng = rand::thread_rng();
        let mut patterns = PatternMetrics::new();
        let mut protocol = CoreProtocol::new().unwrap();
        let mut autonomous = AutonomousSystem::new();

        protocol.initialize_system().unwrap();
        assert!(autonomous.initialize());
        autonomous.activate().unwrap();

        let mut last_threshold = autonomous.optimization_threshold();
        for i in 0..12 {
            let id = format!("p{}", i);
            let raw: Vec<f64> = (0..7).map(|_| rng.gen::<f64>() * 4.0).collect();

            patterns.register(&id, &raw).unwrap();
            let optimized = patterns.optimize(&id).unwrap();
            protocol.register_neural_pattern(&id, &optimized).unwrap();

            let result = protocol.process_pattern(&id).unwrap();
            assert_eq!(result.circuit_width, 7);

            let report = autonomous
                .process_quantum_results(&result.quantum_state)
                .unwrap();
            assert!((0.0..=1.0).contains(&report.pattern_accuracy));

            autonomous.optimize_performance();
            assert_eq!(autonomous.state(), SystemState::Active);
            assert!(autonomous.optimization_threshold() <= last_threshold);
            last_threshold = autonomous.optimization_threshold();
        }

        assert_eq!(patterns.len(), 12);
        assert_eq!(protocol.get_system_status().registered_patterns, 12);
        assert_eq!(autonomous.metrics_history().len(), 12);
    }
}
