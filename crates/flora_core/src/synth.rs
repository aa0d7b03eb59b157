//! Synthetic confidence generation standing in for real inference.
//!
//! The generator is injected so callers can seed a `StdRng` and get
//! reproducible output in tests; the GUI seeds from the OS.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which of the two demo generators to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisMode {
    /// Slot i starts from `factor * 0.8^i` plus uniform noise, so earlier
    /// slots dominate and a larger factor yields a sharper top-1.
    #[default]
    Weighted,
    /// Every slot draws uniformly from [0,1) before normalization.
    Uniform,
}

/// Weighted variant: `base_i = factor * 0.8^i + U(0, 0.1)`, normalized to
/// sum 1.0 and sorted descending. `factor` must lie in (0,1].
pub fn synthesize_weighted<R: Rng>(rng: &mut R, factor: f64, count: usize) -> Vec<f64> {
    let base: Vec<f64> = (0..count)
        .map(|i| factor * 0.8f64.powi(i as i32) + rng.random_range(0.0..0.1))
        .collect();
    normalize_sorted(base)
}

/// Unweighted variant: every base value drawn uniformly from [0,1).
pub fn synthesize_uniform<R: Rng>(rng: &mut R, count: usize) -> Vec<f64> {
    let base: Vec<f64> = (0..count).map(|_| rng.random_range(0.0..1.0)).collect();
    normalize_sorted(base)
}

/// Dispatch on mode; weighted ignores nothing, uniform ignores the factor.
pub fn synthesize<R: Rng>(rng: &mut R, mode: SynthesisMode, factor: f64, count: usize) -> Vec<f64> {
    match mode {
        SynthesisMode::Weighted => synthesize_weighted(rng, factor, count),
        SynthesisMode::Uniform => synthesize_uniform(rng, count),
    }
}

fn normalize_sorted(base: Vec<f64>) -> Vec<f64> {
    let n = base.len();
    let total: f64 = base.iter().sum();
    let mut probs: Vec<f64> = if total > 0.0 {
        base.into_iter().map(|p| p / total).collect()
    } else {
        // All-zero draws cannot happen with the ranges above, but a uniform
        // fallback keeps the sum invariant regardless.
        vec![1.0 / n.max(1) as f64; n]
    };
    probs.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    probs
}
