//! Social attention: per-partner empathy scores normalized into a
//! probability distribution.

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::debug;

use crate::empathy::EmpathyEngine;
use crate::error::Result;
use crate::system::SpinSystem;

/// Minimum total score mass before the uniform fallback kicks in.
const MASS_EPSILON: f32 = 1e-8;

/// Empathy-weighted attention over `others`.
///
/// Pairing `i` is scored with seed `seed_base + i`, so runs are reproducible
/// while each pairing sees distinct randomness. The output sums to one; zero
/// total mass degrades to the uniform distribution, and empty input yields
/// an empty vector.
///
/// With the `rayon` feature the pairings are scored concurrently: they share
/// no mutable state, and the scores are collected in index order before the
/// sum-then-normalize reduction, so the result is identical either way.
pub fn attention_weights(
    engine: &EmpathyEngine,
    self_system: &SpinSystem,
    others: &[SpinSystem],
    steps: Option<usize>,
    seed_base: u64,
) -> Result<Vec<f32>> {
    if others.is_empty() {
        return Ok(Vec::new());
    }

    #[cfg(feature = "rayon")]
    let scores: Vec<f32> = others
        .par_iter()
        .enumerate()
        .map(|(i, other)| {
            engine.compute_empathy(self_system, other, steps, seed_base.wrapping_add(i as u64))
        })
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "rayon"))]
    let scores: Vec<f32> = others
        .iter()
        .enumerate()
        .map(|(i, other)| {
            engine.compute_empathy(self_system, other, steps, seed_base.wrapping_add(i as u64))
        })
        .collect::<Result<_>>()?;

    debug!(partners = others.len(), "attention scores computed");
    Ok(normalize(scores))
}

/// Normalize non-negative scores to sum one, or fall back to the uniform
/// distribution when the total mass is numerically zero.
fn normalize(scores: Vec<f32>) -> Vec<f32> {
    let total: f32 = scores.iter().sum();
    if total <= MASS_EPSILON {
        return vec![1.0 / scores.len() as f32; scores.len()];
    }
    scores.into_iter().map(|s| s / total).collect()
}
