//! Error types for spin-system construction and validation.

use thiserror::Error;

/// Errors raised while constructing or validating spin systems.
///
/// Everything downstream of a validated system is plain arithmetic;
/// legitimate boundary states (zero norms, empty buffers, zero attention
/// mass) degrade to documented fallback values instead of erroring.
#[derive(Debug, Error)]
pub enum ThermomindError {
    /// System size below the one-spin minimum.
    #[error("Invalid system size: {0} (must be >= 1)")]
    InvalidSize(usize),

    /// Mismatch between expected and actual vector/matrix dimensions.
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Coupling matrix is not symmetric.
    #[error("Coupling matrix not symmetric at ({i}, {j}): {upper} != {lower}")]
    AsymmetricCoupling {
        i: usize,
        j: usize,
        upper: f32,
        lower: f32,
    },

    /// Coupling matrix has a nonzero diagonal entry.
    #[error("Nonzero coupling diagonal at {i}: {value}")]
    NonzeroDiagonal { i: usize, value: f32 },

    /// Spin value other than -1 or +1.
    #[error("Invalid spin value at {i}: {value} (must be -1 or +1)")]
    InvalidSpin { i: usize, value: f32 },
}

/// Result type alias for thermomind operations.
pub type Result<T> = std::result::Result<T, ThermomindError>;
