//! Pattern Metrics - registration, scoring and optimization
//!
//! Patterns are min-max normalized on the way in, scored once, and stored
//! with their metadata. Registration rejects duplicate identifiers; this
//! store is separate from CoreProtocol's raw registry, which overwrites.
//!
//! ## Module Structure
//!
//! - `metrics` - normalize, complexity, stability, quantum affinity
//! - `types` - PatternMetadata, PatternAnalysis

pub mod metrics;
pub mod types;

pub use types::{PatternAnalysis, PatternMetadata};

use std::collections::HashMap;

use aria_core::config::PatternConfig;
use aria_core::error::{AriaError, AriaResult};
use chrono::Utc;

use types::StoredPattern;

/// Normalized pattern store with derived metadata
#[derive(Debug, Clone, Default)]
pub struct PatternMetrics {
    patterns: HashMap<String, StoredPattern>,
    config: PatternConfig,
}

impl PatternMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PatternConfig) -> AriaResult<Self> {
        config.validate()?;
        Ok(Self {
            patterns: HashMap::new(),
            config,
        })
    }

    pub fn activation_threshold(&self) -> f64 {
        self.config.activation_threshold
    }

    /// Register a new pattern
    ///
    /// Fails with `DuplicateIdentifier` if the id is taken and with
    /// `DegenerateInput` if the pattern cannot be normalized or scored.
    pub fn register(&mut self, id: &str, pattern: &[f64]) -> AriaResult<PatternMetadata> {
        if self.patterns.contains_key(id) {
            return Err(AriaError::DuplicateIdentifier(id.to_string()));
        }

        let normalized = metrics::normalize(pattern)?;
        let now = Utc::now();
        let metadata = self.score(&normalized, now, now)?;

        tracing::info!(
            "🧬 Pattern {} registered (complexity: {:.3}, stability: {:.3}, affinity: {:.3})",
            id,
            metadata.complexity_score,
            metadata.stability_index,
            metadata.quantum_affinity
        );

        self.patterns.insert(
            id.to_string(),
            StoredPattern {
                data: normalized,
                metadata: metadata.clone(),
            },
        );
        Ok(metadata)
    }

    /// Analyze a registered pattern
    pub fn analyze(&self, id: &str) -> AriaResult<PatternAnalysis> {
        let stored = self.get(id)?;
        let active = metrics::mean(&stored.data) > self.config.activation_threshold;

        Ok(PatternAnalysis {
            complexity: stored.metadata.complexity_score,
            stability: stored.metadata.stability_index,
            quantum_affinity: stored.metadata.quantum_affinity,
            activation_potential: if active { 1.0 } else { 0.0 },
        })
    }

    /// Damp every sub-threshold element
    ///
    /// Pure: neither the stored pattern nor its metadata change. Use
    /// `commit_optimization` to keep the result.
    pub fn optimize(&self, id: &str) -> AriaResult<Vec<f64>> {
        let stored = self.get(id)?;
        Ok(self.damp(&stored.data))
    }

    /// Replace the stored pattern with its optimized form and rescore it
    ///
    /// `created_at` is kept, `last_modified` moves to now.
    pub fn commit_optimization(&mut self, id: &str) -> AriaResult<PatternMetadata> {
        let (optimized, created_at) = {
            let stored = self.get(id)?;
            (self.damp(&stored.data), stored.metadata.created_at)
        };
        let metadata = self.score(&optimized, created_at, Utc::now())?;

        tracing::debug!(
            "🔧 Pattern {} optimized in place (affinity now {:.3})",
            id,
            metadata.quantum_affinity
        );

        self.patterns.insert(
            id.to_string(),
            StoredPattern {
                data: optimized,
                metadata: metadata.clone(),
            },
        );
        Ok(metadata)
    }

    pub fn metadata(&self, id: &str) -> AriaResult<&PatternMetadata> {
        Ok(&self.get(id)?.metadata)
    }

    /// The stored (normalized) pattern
    pub fn pattern(&self, id: &str) -> AriaResult<&[f64]> {
        Ok(&self.get(id)?.data)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.patterns.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn get(&self, id: &str) -> AriaResult<&StoredPattern> {
        self.patterns.get(id).ok_or_else(|| AriaError::not_found(id))
    }

    fn damp(&self, data: &[f64]) -> Vec<f64> {
        data.iter()
            .map(|&v| {
                if v < self.config.activation_threshold {
                    v * self.config.sub_threshold_damping
                } else {
                    v
                }
            })
            .collect()
    }

    fn score(
        &self,
        data: &[f64],
        created_at: chrono::DateTime<Utc>,
        last_modified: chrono::DateTime<Utc>,
    ) -> AriaResult<PatternMetadata> {
        Ok(PatternMetadata {
            created_at,
            last_modified,
            complexity_score: metrics::complexity(data)?,
            stability_index: metrics::stability(data),
            quantum_affinity: metrics::quantum_affinity(data, self.config.entropy_epsilon)?,
        })
    }
}
