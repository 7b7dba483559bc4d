//! Pure metric functions over pattern arrays
//!
//! Every function here either returns a finite value or a
//! `DegenerateInput` error. NaN never leaves this module.

use aria_core::error::{AriaError, AriaResult};

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Min-max rescale to [0, 1]
pub fn normalize(pattern: &[f64]) -> AriaResult<Vec<f64>> {
    if pattern.is_empty() {
        return Err(AriaError::degenerate("cannot normalize an empty pattern"));
    }
    if pattern.iter().any(|v| !v.is_finite()) {
        return Err(AriaError::degenerate("pattern contains non-finite values"));
    }

    let min = pattern.iter().copied().fold(f64::INFINITY, f64::min);
    let max = pattern.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        return Err(AriaError::degenerate(format!(
            "constant pattern (all elements {}) has no range to normalize",
            min
        )));
    }
    if !range.is_finite() {
        return Err(AriaError::degenerate("pattern range overflows"));
    }

    Ok(pattern.iter().map(|v| (v - min) / range).collect())
}

/// Discrete gradient: central differences inside, one-sided at the edges
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut grad = Vec::with_capacity(n);
    grad.push(values[1] - values[0]);
    for i in 1..n - 1 {
        grad.push((values[i + 1] - values[i - 1]) / 2.0);
    }
    grad.push(values[n - 1] - values[n - 2]);
    grad
}

/// Spread scaled by the log of the length
pub fn complexity(normalized: &[f64]) -> AriaResult<f64> {
    if normalized.len() < 2 {
        return Err(AriaError::degenerate(format!(
            "complexity needs at least 2 elements, got {}",
            normalized.len()
        )));
    }
    Ok(std_dev(normalized) * (normalized.len() as f64).ln())
}

/// 1 / (1 + spread of the gradient): smooth patterns score close to 1
pub fn stability(normalized: &[f64]) -> f64 {
    1.0 / (1.0 + std_dev(&gradient(normalized)))
}

/// Shannon-style entropy over the element values themselves
pub fn entropy(normalized: &[f64], epsilon: f64) -> f64 {
    -normalized.iter().map(|p| p * (p + epsilon).log2()).sum::<f64>()
}

/// Inverse entropy score
pub fn quantum_affinity(normalized: &[f64], epsilon: f64) -> AriaResult<f64> {
    if normalized.iter().any(|p| *p < 0.0 || !p.is_finite()) {
        return Err(AriaError::degenerate(
            "entropy requires non-negative finite values",
        ));
    }

    let denom = 1.0 + entropy(normalized, epsilon);
    if denom <= 0.0 || !denom.is_finite() {
        return Err(AriaError::degenerate(format!(
            "entropy denominator {} is not positive",
            denom
        )));
    }
    Ok(1.0 / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_normalize_range() {
        let normalized = normalize(&[3.0, -1.0, 7.0, 2.0]).unwrap();
        assert_eq!(normalized.len(), 4);
        assert_eq!(normalized[1], 0.0);
        assert_eq!(normalized[2], 1.0);
        assert!((normalized[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_constant_is_degenerate() {
        assert!(matches!(
            normalize(&[0.4; 5]),
            Err(AriaError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_nan_and_empty() {
        assert!(normalize(&[0.1, f64::NAN, 0.3]).is_err());
        assert!(normalize(&[]).is_err());
    }

    #[test]
    fn test_gradient_matches_central_differences() {
        let grad = gradient(&[1.0, 2.0, 4.0, 7.0]);
        assert_eq!(grad, vec![1.0, 1.5, 2.5, 3.0]);

        let grad = gradient(&[0.0, 1.0]);
        assert_eq!(grad, vec![1.0, 1.0]);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
        assert_eq!(std_dev(&[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_complexity() {
        // std of [0, 1] is 0.5
        let c = complexity(&[0.0, 1.0]).unwrap();
        assert!((c - 0.5 * 2f64.ln()).abs() < 1e-12);

        assert!(complexity(&[1.0]).is_err());
    }

    #[test]
    fn test_linear_ramp_is_perfectly_stable() {
        let ramp: Vec<f64> = (0..7).map(|i| i as f64 / 6.0).collect();
        assert!((stability(&ramp) - 1.0).abs() < 1e-9);

        let jagged = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        assert!(stability(&jagged) < 1.0);
    }

    #[test]
    fn test_quantum_affinity() {
        // Only zeros and ones: entropy is (almost) zero
        let a = quantum_affinity(&[0.0, 1.0, 0.0], EPS).unwrap();
        assert!((a - 1.0).abs() < 1e-6);

        // Mid-range values carry entropy and lower the score
        let b = quantum_affinity(&[0.0, 0.5, 0.5, 1.0], EPS).unwrap();
        assert!(b < a);
        assert!((b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_quantum_affinity_rejects_negative() {
        assert!(matches!(
            quantum_affinity(&[-0.5, 1.0], EPS),
            Err(AriaError::DegenerateInput(_))
        ));
    }
}
