//! Autonomous System - monitoring and self-optimization
//!
//! A state machine over result arrays that were already produced elsewhere.
//! It never touches the substrate or the pattern store: results come in by
//! value, metrics are recorded, and an acceptance threshold drifts down
//! whenever recent accuracy falls short of it.
//!
//! ```text
//! Initializing --initialize--> Standby --activate--> Active
//! Active --process--> Processing --> Active   (Error on bad input)
//! Active --optimize--> Optimizing --> Active
//! ```

pub mod types;

pub use types::{OptimizationReport, ProcessingReport, SystemMetrics, SystemState};

use aria_core::config::AutonomousConfig;
use aria_core::error::{AriaError, AriaResult};
use chrono::Utc;

/// The autonomous control loop
#[derive(Debug, Clone)]
pub struct AutonomousSystem {
    current_state: SystemState,
    /// Oldest first
    metrics_history: Vec<SystemMetrics>,
    optimization_threshold: f64,
    safety_protocols_active: bool,
    config: AutonomousConfig,
}

impl Default for AutonomousSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl AutonomousSystem {
    pub fn new() -> Self {
        Self::with_config(AutonomousConfig::default())
    }

    /// Configuration is checked by `initialize`, not here
    pub fn with_config(config: AutonomousConfig) -> Self {
        Self {
            current_state: SystemState::Initializing,
            metrics_history: Vec::new(),
            optimization_threshold: config.optimization_threshold,
            safety_protocols_active: true,
            config,
        }
    }

    // ========================================================================
    // STATE TRANSITIONS
    // ========================================================================

    /// Engage safety protocols, reset monitoring, move to Standby
    ///
    /// Never returns an error: any failure moves the system to Error and
    /// reports `false`.
    pub fn initialize(&mut self) -> bool {
        match self.try_initialize() {
            Ok(()) => {
                self.current_state = SystemState::Standby;
                tracing::info!(
                    "🛡️ Autonomous system on standby (threshold: {:.3})",
                    self.optimization_threshold
                );
                true
            }
            Err(e) => {
                self.current_state = SystemState::Error;
                tracing::warn!("⚠️ Autonomous system failed to initialize: {}", e);
                false
            }
        }
    }

    /// Move to Active; refused while safety protocols are disengaged
    pub fn activate(&mut self) -> AriaResult<SystemState> {
        if !self.safety_protocols_active {
            tracing::warn!("⛔ Activation refused: safety protocols not engaged");
            return Err(AriaError::SafetyViolation(
                "cannot activate: safety protocols not engaged".to_string(),
            ));
        }

        self.current_state = SystemState::Active;
        tracing::info!("✅ Autonomous system active");
        Ok(self.current_state)
    }

    pub fn disengage_safety_protocols(&mut self) {
        self.safety_protocols_active = false;
        tracing::warn!("⚠️ Safety protocols disengaged");
    }

    /// Score one result array and record it
    pub fn process_quantum_results(&mut self, results: &[f64]) -> AriaResult<ProcessingReport> {
        if results.is_empty() {
            self.current_state = SystemState::Error;
            return Err(AriaError::EmptyInput(
                "no quantum results to process".to_string(),
            ));
        }
        if results.iter().any(|r| !r.is_finite()) {
            self.current_state = SystemState::Error;
            return Err(AriaError::degenerate("quantum results contain non-finite values"));
        }

        self.current_state = SystemState::Processing;

        let len = results.len() as f64;
        let processing_load = results.iter().sum::<f64>() / len;
        let quantum_utilization = results.iter().map(|r| r.abs()).sum::<f64>() / len;
        if !(processing_load.is_finite() && quantum_utilization.is_finite()) {
            self.current_state = SystemState::Error;
            return Err(AriaError::degenerate("quantum results overflow when aggregated"));
        }
        let pattern_accuracy = results
            .iter()
            .filter(|r| **r > self.config.accuracy_cutoff)
            .count() as f64
            / len;
        let response_time = len * self.config.unit_response_time;

        if response_time * 1000.0 > self.config.max_response_time_ms as f64 {
            tracing::warn!(
                "🐢 Response time {:.1}ms over budget ({}ms)",
                response_time * 1000.0,
                self.config.max_response_time_ms
            );
        }

        self.record(SystemMetrics {
            timestamp: Utc::now(),
            processing_load,
            quantum_utilization,
            pattern_accuracy,
            response_time,
        });

        self.current_state = SystemState::Active;

        tracing::debug!(
            "📊 Processed {} results (load: {:.3}, utilization: {:.3}, accuracy: {:.3})",
            results.len(),
            processing_load,
            quantum_utilization,
            pattern_accuracy
        );

        Ok(ProcessingReport {
            processing_efficiency: processing_load,
            quantum_utilization,
            pattern_accuracy,
        })
    }

    /// Compare recent accuracy to the threshold and lower it if short
    ///
    /// The threshold only ever decreases. Always ends in Active.
    pub fn optimize_performance(&mut self) -> OptimizationReport {
        self.current_state = SystemState::Optimizing;

        let start = self
            .metrics_history
            .len()
            .saturating_sub(self.config.optimization_window);
        let recent = &self.metrics_history[start..];

        // Nothing to analyze: no history yet, or a zero-width window
        if recent.is_empty() {
            self.current_state = SystemState::Active;
            return OptimizationReport {
                optimization_status: 0.0,
                new_threshold: None,
            };
        }

        let avg_accuracy =
            recent.iter().map(|m| m.pattern_accuracy).sum::<f64>() / recent.len() as f64;

        if avg_accuracy < self.optimization_threshold {
            let old = self.optimization_threshold;
            self.optimization_threshold *= self.config.threshold_decay;
            tracing::info!(
                "🎯 Accuracy {:.3} below threshold, adapting {:.4} → {:.4}",
                avg_accuracy,
                old,
                self.optimization_threshold
            );
        }

        self.current_state = SystemState::Active;

        OptimizationReport {
            optimization_status: avg_accuracy,
            new_threshold: Some(self.optimization_threshold),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn state(&self) -> SystemState {
        self.current_state
    }

    pub fn metrics_history(&self) -> &[SystemMetrics] {
        &self.metrics_history
    }

    pub fn optimization_threshold(&self) -> f64 {
        self.optimization_threshold
    }

    pub fn safety_protocols_active(&self) -> bool {
        self.safety_protocols_active
    }

    /// Metrics history as pretty JSON
    pub fn export_metrics(&self) -> AriaResult<String> {
        Ok(serde_json::to_string_pretty(&self.metrics_history)?)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn try_initialize(&mut self) -> AriaResult<()> {
        self.verify_safety_protocols();
        self.initialize_monitoring()
    }

    fn verify_safety_protocols(&mut self) {
        self.safety_protocols_active = true;
    }

    fn initialize_monitoring(&mut self) -> AriaResult<()> {
        self.config.validate()?;
        self.metrics_history.clear();
        Ok(())
    }

    fn record(&mut self, metrics: SystemMetrics) {
        self.metrics_history.push(metrics);

        if let Some(limit) = self.config.history_limit {
            if self.metrics_history.len() > limit {
                let excess = self.metrics_history.len() - limit;
                self.metrics_history.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_results(len: usize) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        (0..len).map(|_| rng.gen::<f64>()).collect()
    }

    fn active_system() -> AutonomousSystem {
        let mut system = AutonomousSystem::new();
        assert!(system.initialize());
        system.activate().unwrap();
        system
    }

    #[test]
    fn test_system_initialization() {
        let mut system = AutonomousSystem::new();
        assert_eq!(system.state(), SystemState::Initializing);

        assert!(system.initialize());
        assert_eq!(system.state(), SystemState::Standby);
        assert!(system.metrics_history().is_empty());
        assert_eq!(system.optimization_threshold(), 0.85);
    }

    #[test]
    fn test_initialize_failure_moves_to_error() {
        let config = AutonomousConfig {
            optimization_window: 0,
            ..AutonomousConfig::default()
        };
        let mut system = AutonomousSystem::with_config(config);

        assert!(!system.initialize());
        assert_eq!(system.state(), SystemState::Error);
    }

    #[test]
    fn test_initialize_clears_history() {
        let mut system = active_system();
        system.process_quantum_results(&random_results(5)).unwrap();
        assert_eq!(system.metrics_history().len(), 1);

        assert!(system.initialize());
        assert!(system.metrics_history().is_empty());
    }

    #[test]
    fn test_system_activation() {
        let mut system = AutonomousSystem::new();
        system.initialize();

        let state = system.activate().unwrap();
        assert_eq!(state, SystemState::Active);
        assert!(system.safety_protocols_active());
    }

    #[test]
    fn test_safety_protocols() {
        let mut system = AutonomousSystem::new();
        system.initialize();
        assert!(system.safety_protocols_active());

        system.disengage_safety_protocols();
        assert!(matches!(system.activate(), Err(AriaError::SafetyViolation(_))));
        assert_eq!(system.state(), SystemState::Standby);

        // initialize re-engages them
        system.initialize();
        assert!(system.activate().is_ok());
    }

    #[test]
    fn test_activate_before_initialize_without_safety() {
        let mut system = AutonomousSystem::new();
        system.disengage_safety_protocols();

        assert!(matches!(system.activate(), Err(AriaError::SafetyViolation(_))));
        assert_eq!(system.state(), SystemState::Initializing);
    }

    #[test]
    fn test_quantum_results_processing() {
        let mut system = active_system();
        let report = system
            .process_quantum_results(&[0.2, 0.6, 0.8, -0.4])
            .unwrap();

        assert!((report.processing_efficiency - 0.3).abs() < 1e-12);
        assert!((report.quantum_utilization - 0.5).abs() < 1e-12);
        assert!((report.pattern_accuracy - 0.5).abs() < 1e-12);
        assert_eq!(system.state(), SystemState::Active);

        let record = &system.metrics_history()[0];
        assert!((record.response_time - 0.004).abs() < 1e-12);
        assert_eq!(record.pattern_accuracy, report.pattern_accuracy);
    }

    #[test]
    fn test_empty_results_rejected() {
        let mut system = active_system();
        assert!(matches!(
            system.process_quantum_results(&[]),
            Err(AriaError::EmptyInput(_))
        ));
        assert_eq!(system.state(), SystemState::Error);
        assert!(system.metrics_history().is_empty());

        // Recovery goes through activation
        system.activate().unwrap();
        assert_eq!(system.state(), SystemState::Active);
    }

    #[test]
    fn test_non_finite_results_rejected() {
        let mut system = active_system();
        assert!(matches!(
            system.process_quantum_results(&[0.5, f64::NAN]),
            Err(AriaError::DegenerateInput(_))
        ));
        assert_eq!(system.state(), SystemState::Error);
    }

    #[test]
    fn test_overflowing_results_rejected() {
        let mut system = active_system();
        assert!(matches!(
            system.process_quantum_results(&[f64::MAX, f64::MAX]),
            Err(AriaError::DegenerateInput(_))
        ));
        assert_eq!(system.state(), SystemState::Error);
        assert!(system.metrics_history().is_empty());

        // History stays exportable as typed records
        system.activate().unwrap();
        system.process_quantum_results(&[0.4, 0.6]).unwrap();
        let json = system.export_metrics().unwrap();
        let parsed: Vec<SystemMetrics> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_processing_ends_active_or_error() {
        let mut system = active_system();
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let len = rng.gen_range(0..20);
            let _ = system.process_quantum_results(&random_results(len));
            assert!(matches!(
                system.state(),
                SystemState::Active | SystemState::Error
            ));
        }
    }

    #[test]
    fn test_optimize_with_empty_history() {
        let mut system = active_system();
        let report = system.optimize_performance();

        assert_eq!(report.optimization_status, 0.0);
        assert!(report.new_threshold.is_none());
        assert_eq!(system.state(), SystemState::Active);
        assert_eq!(system.optimization_threshold(), 0.85);
    }

    #[test]
    fn test_zero_window_analyzes_nothing() {
        let config = AutonomousConfig {
            optimization_window: 0,
            ..AutonomousConfig::default()
        };
        let mut system = AutonomousSystem::with_config(config);
        system.activate().unwrap();
        system.process_quantum_results(&[0.9, 0.9]).unwrap();

        let report = system.optimize_performance();
        assert_eq!(report.optimization_status, 0.0);
        assert!(report.new_threshold.is_none());
        assert_eq!(system.optimization_threshold(), 0.85);
        assert_eq!(system.state(), SystemState::Active);
    }

    #[test]
    fn test_low_accuracy_lowers_threshold() {
        let mut system = active_system();
        system.process_quantum_results(&[0.1, 0.2, 0.9]).unwrap();

        let report = system.optimize_performance();
        assert!((report.optimization_status - 1.0 / 3.0).abs() < 1e-12);
        let expected = 0.85 * 0.95;
        assert!((system.optimization_threshold() - expected).abs() < 1e-12);
        assert_eq!(report.new_threshold, Some(system.optimization_threshold()));
        assert_eq!(system.state(), SystemState::Active);
    }

    #[test]
    fn test_high_accuracy_keeps_threshold() {
        let mut system = active_system();
        system.process_quantum_results(&[0.9, 0.95, 0.99]).unwrap();

        let report = system.optimize_performance();
        assert_eq!(report.optimization_status, 1.0);
        assert_eq!(system.optimization_threshold(), 0.85);
    }

    #[test]
    fn test_optimization_window() {
        let mut system = active_system();
        for _ in 0..5 {
            system.process_quantum_results(&[0.0; 4]).unwrap();
        }
        for _ in 0..10 {
            system.process_quantum_results(&[1.0; 4]).unwrap();
        }

        // Only the last 10 (all accurate) are considered
        let report = system.optimize_performance();
        assert_eq!(report.optimization_status, 1.0);
        assert_eq!(system.optimization_threshold(), 0.85);
    }

    #[test]
    fn test_threshold_never_increases() {
        let mut system = active_system();
        let mut last = system.optimization_threshold();

        for _ in 0..30 {
            system.process_quantum_results(&random_results(10)).unwrap();
            system.optimize_performance();
            assert!(system.optimization_threshold() <= last);
            assert_eq!(system.state(), SystemState::Active);
            last = system.optimization_threshold();
        }
    }

    #[test]
    fn test_history_limit() {
        let config = AutonomousConfig {
            history_limit: Some(3),
            ..AutonomousConfig::default()
        };
        let mut system = AutonomousSystem::with_config(config);
        system.initialize();
        system.activate().unwrap();

        for i in 0..5 {
            system.process_quantum_results(&[i as f64]).unwrap();
        }
        let loads: Vec<f64> = system
            .metrics_history()
            .iter()
            .map(|m| m.processing_load)
            .collect();
        assert_eq!(loads, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_export_metrics() {
        let mut system = active_system();
        system.process_quantum_results(&random_results(10)).unwrap();

        let json = system.export_metrics().unwrap();
        let parsed: Vec<SystemMetrics> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(json.contains("pattern_accuracy"));
    }

    #[test]
    fn test_state_names() {
        assert_eq!(SystemState::Optimizing.to_string(), "optimizing");
        assert_eq!(
            serde_json::to_string(&SystemState::Standby).unwrap(),
            "\"standby\""
        );
    }
}
