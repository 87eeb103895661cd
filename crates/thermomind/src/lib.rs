//! # thermomind
//!
//! A seeded Monte Carlo spin-model engine for agent state simulation.
//!
//! Each agent owns an Ising-style [`SpinSystem`]; a [`PerspectiveSimulator`]
//! anneals a clone of another agent's system to predict its settled state;
//! an [`EmpathyEngine`] folds prediction accuracy and structural coupling
//! similarity into one bounded score. The "emotion" and "empathy" labels are
//! domain framing over well-defined statistics.
//!
//! ## Core abstractions
//!
//! | Module | What it provides |
//! |--------|-----------------|
//! | [`system`] | `SpinSystem`, `Couplings` – lattice state + Hamiltonian |
//! | [`anneal`] | Metropolis annealer with floored acceptance, `AnnealParams` |
//! | [`emotion`] | `EmotionVector` – 4-component observable summary |
//! | [`perspective`] | `PerspectiveSimulator` – predict + accuracy |
//! | [`empathy`] | `EmpathyEngine` – scoring, similarity cache, response |
//! | [`memory`] | `MemoryBuffer` – ring store with trend stats |
//! | [`attention`] | empathy-weighted attention distribution |
//!
//! ## Quick start
//!
//! ```
//! use thermomind::{EmpathyEngine, SpinSystem};
//!
//! let me = SpinSystem::seeded(16, 1)?;
//! let you = SpinSystem::seeded(16, 2)?;
//!
//! let engine = EmpathyEngine::default();
//! let score = engine.compute_empathy(&me, &you, None, 42)?;
//! assert!((0.0..=1.0).contains(&score));
//! # Ok::<(), thermomind::ThermomindError>(())
//! ```
//!
//! All randomness is seed-driven: the same seed reproduces the same run
//! bit for bit, so retrying never changes an answer — vary the seed to
//! explore instead.

pub mod anneal;
pub mod attention;
pub mod emotion;
pub mod empathy;
pub mod error;
pub mod memory;
pub mod perspective;
pub mod system;

// Re-export the most commonly used items at the crate root.
pub use anneal::{anneal, AnnealParams};
pub use attention::attention_weights;
pub use emotion::{encode_emotion, EmotionVector};
pub use empathy::{coupling_similarity, EmpathyConfig, EmpathyEngine};
pub use error::{Result, ThermomindError};
pub use memory::{MemoryBuffer, MemoryEntry, RecallStats, DEFAULT_MEMORY_SIZE};
pub use perspective::{PerspectiveAccuracy, PerspectiveSimulator};
pub use system::{Couplings, SpinSystem};
