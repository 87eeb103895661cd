//! Empathy scoring: prediction accuracy combined with structural coupling
//! similarity, and the score-driven compassionate-response mutation.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ThermomindError};
use crate::perspective::PerspectiveSimulator;
use crate::system::{Couplings, SpinSystem};

/// Weights and thresholds for empathy scoring and response.
///
/// The three score weights are compatibility constants: downstream
/// consumers compare scores across runs, so changing them changes the
/// meaning of every previously recorded score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmpathyConfig {
    /// Weight of the predicted-vs-actual state overlap.
    pub overlap_weight: f32,
    /// Weight of the inverted relative energy error.
    pub energy_weight: f32,
    /// Weight of the coupling-matrix similarity.
    pub coupling_weight: f32,
    /// Score above which the response blends couplings instead of noising.
    pub blend_threshold: f32,
    /// Blend fraction per unit of empathy score.
    pub coupling_strength: f32,
    /// Per-spin flip probability scale for the low-empathy noise branch.
    pub noise_temperature: f32,
    /// Similarity-cache entries held before the cache is cleared wholesale.
    pub cache_capacity: usize,
}

impl Default for EmpathyConfig {
    fn default() -> Self {
        Self {
            overlap_weight: 0.4,
            energy_weight: 0.3,
            coupling_weight: 0.3,
            blend_threshold: 0.5,
            coupling_strength: 0.1,
            noise_temperature: 0.05,
            cache_capacity: 256,
        }
    }
}

/// Cosine similarity of two coupling matrices over their strict upper
/// triangles, mapped to [0, 1] via `(cos + 1) / 2`.
///
/// Returns 0 when either matrix has (numerically) zero norm.
pub fn coupling_similarity(a: &Couplings, b: &Couplings) -> Result<f32> {
    if a.n() != b.n() {
        return Err(ThermomindError::DimensionMismatch {
            what: "coupling matrix",
            expected: a.n(),
            actual: b.n(),
        });
    }
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.upper_triangle().zip(b.upper_triangle()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let norm = norm_a.sqrt() * norm_b.sqrt();
    if norm <= 1e-8 {
        return Ok(0.0);
    }
    Ok((dot / norm + 1.0) * 0.5)
}

/// Scores how well one agent's model of another holds up, and mutates the
/// observer in response.
///
/// Holds the perspective simulator and a content-hash cache of coupling
/// similarities; all scoring works from `&self`, so independent pairings can
/// be evaluated concurrently.
pub struct EmpathyEngine {
    config: EmpathyConfig,
    simulator: PerspectiveSimulator,
    // Keyed on content hashes of both matrices, order-normalized so the
    // symmetric pair hits the same slot. Cleared wholesale when full.
    similarity_cache: Mutex<HashMap<(u64, u64), f32>>,
}

impl Default for EmpathyEngine {
    fn default() -> Self {
        Self::new(EmpathyConfig::default(), PerspectiveSimulator::default())
    }
}

impl EmpathyEngine {
    pub fn new(config: EmpathyConfig, simulator: PerspectiveSimulator) -> Self {
        Self {
            config,
            simulator,
            similarity_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EmpathyConfig {
        &self.config
    }

    pub fn simulator(&self) -> &PerspectiveSimulator {
        &self.simulator
    }

    fn content_hash(couplings: &Couplings) -> u64 {
        let mut hasher = DefaultHasher::new();
        for value in couplings.upper_triangle() {
            value.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// [`coupling_similarity`], memoized by content hash of both matrices.
    pub fn cached_similarity(&self, a: &Couplings, b: &Couplings) -> Result<f32> {
        let (ha, hb) = (Self::content_hash(a), Self::content_hash(b));
        let key = if ha <= hb { (ha, hb) } else { (hb, ha) };
        if let Some(&sim) = self.similarity_cache.lock().unwrap().get(&key) {
            return Ok(sim);
        }
        let sim = coupling_similarity(a, b)?;
        let mut cache = self.similarity_cache.lock().unwrap();
        if cache.len() >= self.config.cache_capacity {
            cache.clear();
        }
        cache.insert(key, sim);
        Ok(sim)
    }

    /// Bounded empathy score in [0, 1]:
    ///   0.4·overlap + 0.3·max(0, 1 − energy_error) + 0.3·coupling_sim
    ///
    /// Runs a prediction of `other` with the given seed, compares it against
    /// the live state, and folds in structural similarity. Deterministic for
    /// a fixed seed; vary the seed to explore.
    pub fn compute_empathy(
        &self,
        self_system: &SpinSystem,
        other: &SpinSystem,
        steps: Option<usize>,
        seed: u64,
    ) -> Result<f32> {
        let predicted = self.simulator.predict(other, steps, seed);
        let acc = self.simulator.accuracy(&predicted, other)?;
        let sim = self.cached_similarity(self_system.couplings(), other.couplings())?;
        let score = self.config.overlap_weight * acc.state_overlap
            + self.config.energy_weight * (1.0 - acc.energy_error).max(0.0)
            + self.config.coupling_weight * sim;
        let score = score.clamp(0.0, 1.0);
        debug!(
            overlap = acc.state_overlap,
            energy_error = acc.energy_error,
            coupling_sim = sim,
            score,
            "empathy computed"
        );
        Ok(score)
    }

    /// Mutate `self_system` in response to `other` given an empathy score.
    ///
    /// A score above the blend threshold pulls the observer's couplings
    /// toward the other's, with blend fraction `coupling_strength * score`.
    /// Otherwise each spin flips independently with probability
    /// `noise_temperature * (1 − score)`. There is no rollback; the seed is
    /// the only handle on the noise branch's randomness.
    pub fn compassionate_response(
        &self,
        self_system: &mut SpinSystem,
        other: &SpinSystem,
        score: f32,
        seed: u64,
    ) -> Result<()> {
        if score > self.config.blend_threshold {
            let n = self_system.n();
            if other.n() != n {
                return Err(ThermomindError::DimensionMismatch {
                    what: "coupling matrix",
                    expected: n,
                    actual: other.n(),
                });
            }
            // Both operands are symmetric with zero diagonal, so the blend
            // preserves both invariants.
            let blend = self.config.coupling_strength * score;
            for (own, theirs) in self_system
                .couplings
                .j
                .iter_mut()
                .zip(other.couplings.j.iter())
            {
                *own = (1.0 - blend) * *own + blend * *theirs;
            }
        } else {
            let flip_prob = self.config.noise_temperature * (1.0 - score);
            let mut rng = SmallRng::seed_from_u64(seed);
            for i in 0..self_system.n() {
                if rng.gen::<f32>() < flip_prob {
                    self_system.flip(i);
                }
            }
        }
        Ok(())
    }
}
