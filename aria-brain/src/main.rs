//! ARIA Brain - Closed-Loop Runner
//!
//! Generates random patterns, scores and optimizes them, projects them
//! through the substrate and feeds the readouts to the autonomous system.
//!
//! Reads:
//! - ARIA_CONFIG: JSON configuration file (otherwise ARIA_* variables)
//! - ARIA_CYCLES: Number of patterns to run (default: 20)
//! - ARIA_OPTIMIZE_EVERY: Cycles between self-optimization (default: 5)
//! - ARIA_METRICS_PATH: Where to write the metrics history as JSON

use rand::Rng;
use tracing::{info, warn, Level};

use aria_brain::{AutonomousSystem, CoreProtocol, PatternMetrics};
use aria_core::{AriaConfig, AriaError, AriaResult};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    print_banner(&config);

    if let Err(e) = run(&config) {
        tracing::error!("❌ Pipeline failed: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> AriaResult<AriaConfig> {
    match std::env::var("ARIA_CONFIG") {
        Ok(path) => {
            info!("📄 Loading configuration from {}", path);
            AriaConfig::load(path)
        }
        Err(_) => {
            let config = AriaConfig::from_env();
            config.validate()?;
            Ok(config)
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn run(config: &AriaConfig) -> AriaResult<()> {
    let cycles: usize = env_or("ARIA_CYCLES", 20);
    let optimize_every: usize = env_or("ARIA_OPTIMIZE_EVERY", 5).max(1);
    let width = config.substrate.width;

    let mut patterns = PatternMetrics::with_config(config.patterns.clone())?;
    let mut protocol = CoreProtocol::with_config(config)?;
    let mut autonomous = AutonomousSystem::with_config(config.autonomous.clone());

    protocol.initialize_system()?;
    if !autonomous.initialize() {
        return Err(AriaError::NotReady(
            "autonomous system failed to initialize".to_string(),
        ));
    }
    autonomous.activate()?;

    let mut rng = rand::thread_rng();
    for cycle in 1..=cycles {
        let id = format!("pattern-{:03}", cycle);
        let raw: Vec<f64> = (0..width).map(|_| rng.gen::<f64>()).collect();

        match patterns.register(&id, &raw) {
            Ok(_) => {}
            Err(AriaError::DegenerateInput(reason)) => {
                warn!("Skipping {}: {}", id, reason);
                continue;
            }
            Err(e) => return Err(e),
        }

        let analysis = patterns.analyze(&id)?;
        let optimized = patterns.optimize(&id)?;
        protocol.register_neural_pattern(&id, &optimized)?;

        let result = protocol.process_pattern(&id)?;
        let report = autonomous.process_quantum_results(&result.quantum_state)?;

        info!(
            "🔁 {} | affinity {:.3} | active {} | depth {} | accuracy {:.3}",
            id,
            analysis.quantum_affinity,
            analysis.activation_potential > 0.0,
            result.circuit_depth,
            report.pattern_accuracy
        );

        if cycle % optimize_every == 0 {
            let optimization = autonomous.optimize_performance();
            info!(
                "🎯 Self-optimization: recent accuracy {:.3}, threshold {:.4}",
                optimization.optimization_status,
                autonomous.optimization_threshold()
            );
        }
    }

    let status = protocol.get_system_status();
    info!(
        "✨ Done: {} patterns, {} metrics records, threshold {:.4}, state {}",
        status.registered_patterns,
        autonomous.metrics_history().len(),
        autonomous.optimization_threshold(),
        autonomous.state()
    );

    if let Ok(path) = std::env::var("ARIA_METRICS_PATH") {
        std::fs::write(&path, autonomous.export_metrics()?)?;
        info!("💾 Metrics history written to {}", path);
    }

    Ok(())
}

/// Print startup banner with config info
fn print_banner(config: &AriaConfig) {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║        🧠 ARIA Brain v{:<8} - Closed Loop 🧠           ║", VERSION);
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  Width: {:>10}                                       ║", config.substrate.width);
    println!("║  Activation: {:>5.2}                                       ║", config.patterns.activation_threshold);
    println!("║  Threshold: {:>6.2}                                       ║", config.autonomous.optimization_threshold);
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
}
