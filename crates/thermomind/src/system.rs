//! Spin-system state and Hamiltonian: the per-agent lattice model.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, ThermomindError};

/// Coupling weights and local fields for a fully-connected system.
///
/// `j` is a flattened row-major `n×n` symmetric matrix with zero diagonal;
/// `h` is the `n`-vector of local (bias) fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Couplings {
    pub(crate) j: Vec<f32>,
    pub(crate) h: Vec<f32>,
}

impl Couplings {
    /// Build zero-coupling weights for `n` units.
    pub fn zeros(n: usize) -> Self {
        Self {
            j: vec![0.0; n * n],
            h: vec![0.0; n],
        }
    }

    /// Fully connected two-strength couplings with a graded local field.
    ///
    /// `J_ij = 1.0` when `(i + j) % 3 == 0`, else `0.5` (for i < j, mirrored
    /// below the diagonal); `h_i = 0.1 * (i/n − 0.5)` grows linearly in the
    /// spin index.
    pub fn dense_graded(n: usize) -> Self {
        let mut j = vec![0.0_f32; n * n];
        for i in 0..n {
            for k in (i + 1)..n {
                let w = if (i + k) % 3 == 0 { 1.0 } else { 0.5 };
                j[i * n + k] = w;
                j[k * n + i] = w;
            }
        }
        let h = (0..n)
            .map(|i| 0.1 * (i as f32 / n as f32 - 0.5))
            .collect();
        Self { j, h }
    }

    /// Build couplings from an externally supplied matrix and field.
    ///
    /// Validates dimensions, symmetry, and the zero diagonal.
    pub fn from_parts(j: Vec<f32>, h: Vec<f32>) -> Result<Self> {
        let n = h.len();
        if n == 0 {
            return Err(ThermomindError::InvalidSize(0));
        }
        if j.len() != n * n {
            return Err(ThermomindError::DimensionMismatch {
                what: "coupling matrix",
                expected: n * n,
                actual: j.len(),
            });
        }
        for i in 0..n {
            if j[i * n + i] != 0.0 {
                return Err(ThermomindError::NonzeroDiagonal {
                    i,
                    value: j[i * n + i],
                });
            }
            for k in (i + 1)..n {
                if j[i * n + k] != j[k * n + i] {
                    return Err(ThermomindError::AsymmetricCoupling {
                        i,
                        j: k,
                        upper: j[i * n + k],
                        lower: j[k * n + i],
                    });
                }
            }
        }
        Ok(Self { j, h })
    }

    /// Number of units.
    #[inline]
    pub fn n(&self) -> usize {
        self.h.len()
    }

    /// Coupling weight between units `i` and `k`.
    #[inline]
    pub fn get(&self, i: usize, k: usize) -> f32 {
        self.j[i * self.n() + k]
    }

    /// Flattened row-major coupling matrix.
    pub fn matrix(&self) -> &[f32] {
        &self.j
    }

    /// Local field vector.
    pub fn field(&self) -> &[f32] {
        &self.h
    }

    /// Strict upper-triangle (i < j) entries in row-major order.
    pub(crate) fn upper_triangle(&self) -> impl Iterator<Item = f32> + '_ {
        let n = self.n();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |k| self.j[i * n + k]))
    }
}

/// A spin system: ±1 spin vector plus its couplings and fields.
///
/// Each agent owns its system exclusively; `Clone` produces a fully
/// independent deep copy, which is what lets a simulator explore a
/// hypothetical trajectory without perturbing the source.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinSystem {
    pub(crate) spins: Vec<f32>,
    pub(crate) couplings: Couplings,
}

impl SpinSystem {
    /// Seeded system: uniform ±1 spins over [`Couplings::dense_graded`].
    ///
    /// Spins are drawn directly from {−1, +1}, so a zero value is
    /// unrepresentable. Deterministic given the same seed.
    pub fn seeded(n: usize, seed: u64) -> Result<Self> {
        if n == 0 {
            return Err(ThermomindError::InvalidSize(0));
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        let spins = (0..n)
            .map(|_| if rng.gen::<bool>() { 1.0 } else { -1.0 })
            .collect();
        Ok(Self {
            spins,
            couplings: Couplings::dense_graded(n),
        })
    }

    /// Build a system from an externally supplied state.
    ///
    /// Spin values must be exactly ±1 and match the coupling dimension.
    pub fn from_parts(spins: Vec<f32>, couplings: Couplings) -> Result<Self> {
        if couplings.n() == 0 {
            return Err(ThermomindError::InvalidSize(0));
        }
        if spins.len() != couplings.n() {
            return Err(ThermomindError::DimensionMismatch {
                what: "spin vector",
                expected: couplings.n(),
                actual: spins.len(),
            });
        }
        for (i, &s) in spins.iter().enumerate() {
            if s != 1.0 && s != -1.0 {
                return Err(ThermomindError::InvalidSpin { i, value: s });
            }
        }
        Ok(Self { spins, couplings })
    }

    /// Number of spins.
    #[inline]
    pub fn n(&self) -> usize {
        self.spins.len()
    }

    /// Current spin vector (each value ±1).
    pub fn spins(&self) -> &[f32] {
        &self.spins
    }

    /// Couplings and fields.
    pub fn couplings(&self) -> &Couplings {
        &self.couplings
    }

    /// Hamiltonian energy:
    ///   E = −Σ_{i<j} J_ij s_i s_j − Σ_i h_i s_i
    ///
    /// The i<j sum equals the −0.5-weighted full-matrix form, since J is
    /// symmetric with zero diagonal.
    pub fn energy(&self) -> f32 {
        let n = self.n();
        let mut e = 0.0_f32;
        for i in 0..n {
            e -= self.couplings.h[i] * self.spins[i];
            for k in (i + 1)..n {
                e -= self.couplings.j[i * n + k] * self.spins[i] * self.spins[k];
            }
        }
        e
    }

    /// Mean spin value, in [−1, 1].
    pub fn magnetization(&self) -> f32 {
        self.spins.iter().sum::<f32>() / self.n() as f32
    }

    /// Fraction of nonzero-coupled pairs whose alignment disagrees with the
    /// sign of their coupling. 0 when no pair is coupled.
    pub fn frustration(&self) -> f32 {
        let n = self.n();
        let mut coupled = 0_u32;
        let mut frustrated = 0_u32;
        for i in 0..n {
            for k in (i + 1)..n {
                let jik = self.couplings.j[i * n + k];
                if jik != 0.0 {
                    coupled += 1;
                    if jik * self.spins[i] * self.spins[k] < 0.0 {
                        frustrated += 1;
                    }
                }
            }
        }
        if coupled == 0 {
            0.0
        } else {
            frustrated as f32 / coupled as f32
        }
    }

    /// Energy contribution of spin `i` against the current global state:
    ///   e_i = −s_i (Σ_k J_ik s_k + h_i)
    #[inline]
    pub(crate) fn local_energy(&self, i: usize) -> f32 {
        let n = self.n();
        let mut field = self.couplings.h[i];
        for k in 0..n {
            field += self.couplings.j[i * n + k] * self.spins[k];
        }
        -self.spins[i] * field
    }

    #[inline]
    pub(crate) fn flip(&mut self, i: usize) {
        self.spins[i] = -self.spins[i];
    }
}
