//! Property-based tests for the engine's structural invariants.

use proptest::prelude::*;
use thermomind::{attention_weights, coupling_similarity, EmpathyEngine, SpinSystem};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_seeded_spins_are_plus_or_minus_one(n in 1usize..64, seed in any::<u64>()) {
        let sys = SpinSystem::seeded(n, seed).unwrap();
        prop_assert!(sys.spins().iter().all(|&s| s == 1.0 || s == -1.0));
    }

    #[test]
    fn prop_seeded_coupling_is_symmetric_zero_diagonal(n in 1usize..32, seed in any::<u64>()) {
        let sys = SpinSystem::seeded(n, seed).unwrap();
        let c = sys.couplings();
        for i in 0..n {
            prop_assert_eq!(c.get(i, i), 0.0);
            for k in 0..n {
                prop_assert_eq!(c.get(i, k), c.get(k, i));
            }
        }
    }

    #[test]
    fn prop_anneal_preserves_spin_domain(
        n in 1usize..40,
        seed in any::<u64>(),
        steps in 0usize..30,
    ) {
        let mut sys = SpinSystem::seeded(n, seed).unwrap();
        sys.anneal(steps, seed.wrapping_add(1));
        prop_assert!(sys.spins().iter().all(|&s| s == 1.0 || s == -1.0));
    }

    #[test]
    fn prop_anneal_is_deterministic(n in 1usize..32, seed in any::<u64>()) {
        let base = SpinSystem::seeded(n, seed).unwrap();
        let mut a = base.clone();
        let mut b = base;
        a.anneal(20, seed);
        b.anneal(20, seed);
        prop_assert_eq!(a.spins(), b.spins());
    }

    #[test]
    fn prop_empathy_in_unit_interval(
        n in 1usize..24,
        seed_a in any::<u64>(),
        seed_b in any::<u64>(),
        seed in any::<u64>(),
    ) {
        let engine = EmpathyEngine::default();
        let me = SpinSystem::seeded(n, seed_a).unwrap();
        let you = SpinSystem::seeded(n, seed_b).unwrap();
        let score = engine.compute_empathy(&me, &you, Some(15), seed).unwrap();
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn prop_coupling_self_similarity_is_maximal(n in 2usize..24, seed in any::<u64>()) {
        let sys = SpinSystem::seeded(n, seed).unwrap();
        let sim = coupling_similarity(sys.couplings(), sys.couplings()).unwrap();
        prop_assert!((sim - 1.0).abs() < 1e-5);
    }

    #[test]
    fn prop_attention_weights_sum_to_one(
        n in 1usize..16,
        partners in 1usize..6,
        seed_base in any::<u64>(),
    ) {
        let engine = EmpathyEngine::default();
        let me = SpinSystem::seeded(n, 0).unwrap();
        let others: Vec<_> = (0..partners)
            .map(|i| SpinSystem::seeded(n, i as u64 + 1).unwrap())
            .collect();
        let weights = attention_weights(&engine, &me, &others, Some(10), seed_base).unwrap();
        prop_assert_eq!(weights.len(), partners);
        let total: f32 = weights.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-4);
    }
}
