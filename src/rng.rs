// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! Every simulation builds its own generator from an explicit seed and drops
//! it when the call returns. Nothing is global, and the same seed gives
//! bit-identical draws on every platform.
//!
//! The generator is `Xoshiro256PlusPlus` from `rand_xoshiro`, whose output
//! stream is fixed by its reference algorithm. `seed_from_u64` expands the
//! 64-bit seed through SplitMix64, so adjacent seeds start far apart in the
//! state space.
//!
//! Normal draws go through `rand_distr::StandardNormal` (ziggurat).

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Call-scoped generator used by every simulation
pub type SimRng = Xoshiro256PlusPlus;

/// Build the generator for one simulation call.
///
/// Negative seeds are reinterpreted bit-for-bit, so every `i64` maps to a
/// distinct stream.
pub fn seed_rng(seed: i64) -> SimRng {
    Xoshiro256PlusPlus::seed_from_u64(seed as u64)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_seed_reproducibility() {
        let mut rng1 = seed_rng(42);
        let mut rng2 = seed_rng(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_adjacent_seeds_are_not_shifted_streams() {
        let mut rng1 = seed_rng(1);
        let mut rng2 = seed_rng(2);

        let vals1: Vec<u64> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<u64> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
        assert_ne!(&vals1[1..], &vals2[..9]);
        assert_ne!(&vals2[1..], &vals1[..9]);
    }

    #[test]
    fn test_negative_seed_is_distinct() {
        let mut rng1 = seed_rng(-1);
        let mut rng2 = seed_rng(1);
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_normal_distribution() {
        let mut rng = seed_rng(42);

        let samples: Vec<f64> = (0..20_000).map(|_| get_normal_draw(&mut rng)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.05, "Mean should be close to 0, got {}", mean);
        assert!(
            (variance - 1.0).abs() < 0.05,
            "Variance should be close to 1, got {}",
            variance
        );
    }
}
