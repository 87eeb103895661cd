//! Emotion-style summary of a spin system's instantaneous observables.
//!
//! The labels are domain framing; each component is a plain statistic of
//! the current state, with no hidden parameters.

use serde::{Deserialize, Serialize};

use crate::system::SpinSystem;

/// Four bounded observables derived from a system's state.
///
/// `valence` is tanh-bounded to (−1, 1); the other three lie in [0, 1] by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionVector {
    /// `tanh(−E/n)`: high for low-energy (settled) configurations.
    pub valence: f32,
    /// `1 − |m|`: disorder of the global alignment.
    pub arousal: f32,
    /// Frustration fraction over coupled pairs.
    pub tension: f32,
    /// `|m|`: strength of the global alignment.
    pub coherence: f32,
}

impl EmotionVector {
    pub const ZERO: Self = Self {
        valence: 0.0,
        arousal: 0.0,
        tension: 0.0,
        coherence: 0.0,
    };
}

/// Encode a system's current observables as an [`EmotionVector`].
pub fn encode_emotion(system: &SpinSystem) -> EmotionVector {
    let e = system.energy();
    let m = system.magnetization();
    EmotionVector {
        valence: (-e / system.n() as f32).tanh(),
        arousal: 1.0 - m.abs(),
        tension: system.frustration(),
        coherence: m.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::Couplings;

    #[test]
    fn test_encode_aligned_pair() {
        // Two aligned spins, J01 = 1, no field: E = -1, m = 1.
        let c = Couplings::from_parts(vec![0.0, 1.0, 1.0, 0.0], vec![0.0, 0.0]).unwrap();
        let sys = SpinSystem::from_parts(vec![1.0, 1.0], c).unwrap();
        let emo = encode_emotion(&sys);
        assert!((emo.valence - 0.5_f32.tanh()).abs() < 1e-6);
        assert_eq!(emo.arousal, 0.0);
        assert_eq!(emo.tension, 0.0);
        assert_eq!(emo.coherence, 1.0);
    }

    #[test]
    fn test_encode_frustrated_pair() {
        // Anti-aligned spins against a positive coupling: full tension,
        // zero net magnetization.
        let c = Couplings::from_parts(vec![0.0, 1.0, 1.0, 0.0], vec![0.0, 0.0]).unwrap();
        let sys = SpinSystem::from_parts(vec![1.0, -1.0], c).unwrap();
        let emo = encode_emotion(&sys);
        assert_eq!(emo.tension, 1.0);
        assert_eq!(emo.arousal, 1.0);
        assert_eq!(emo.coherence, 0.0);
        assert!(emo.valence < 0.0);
    }

    #[test]
    fn test_encode_bounds() {
        for seed in 0..20 {
            let sys = SpinSystem::seeded(17, seed).unwrap();
            let emo = encode_emotion(&sys);
            assert!(emo.valence > -1.0 && emo.valence < 1.0);
            assert!((0.0..=1.0).contains(&emo.arousal));
            assert!((0.0..=1.0).contains(&emo.tension));
            assert!((0.0..=1.0).contains(&emo.coherence));
        }
    }

    #[test]
    fn test_encode_is_stateless() {
        let sys = SpinSystem::seeded(12, 3).unwrap();
        assert_eq!(encode_emotion(&sys), encode_emotion(&sys));
    }
}
