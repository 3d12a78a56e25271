// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Seedable noise sources embedded in update rules.
//!
//! Every rule that supports additive noise owns its own [`Randomizer`].
//! Cloning a rule clones the randomizer state, so a copied neuron never
//! shares a PRNG stream with the original.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Distribution sampled by a [`Randomizer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoiseDistribution {
    /// Uniform over `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
}

impl Default for NoiseDistribution {
    fn default() -> Self {
        NoiseDistribution::Uniform {
            low: -1.0,
            high: 1.0,
        }
    }
}

/// A pluggable random source with an explicit seed.
///
/// The generator is seeded lazily so that a deserialized or cloned
/// randomizer replays the same stream only from its captured state, never
/// from a stream shared with another instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Randomizer {
    distribution: NoiseDistribution,
    seed: u64,
    #[serde(skip)]
    rng: Option<StdRng>,
}

impl Randomizer {
    pub fn new(distribution: NoiseDistribution, seed: u64) -> Self {
        Self {
            distribution,
            seed,
            rng: None,
        }
    }

    pub fn uniform(low: f64, high: f64, seed: u64) -> Self {
        Self::new(NoiseDistribution::Uniform { low, high }, seed)
    }

    pub fn normal(mean: f64, std_dev: f64, seed: u64) -> Self {
        Self::new(NoiseDistribution::Normal { mean, std_dev }, seed)
    }

    pub fn distribution(&self) -> NoiseDistribution {
        self.distribution
    }

    pub fn set_distribution(&mut self, distribution: NoiseDistribution) {
        self.distribution = distribution;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Re-seed the generator; the next sample restarts the stream.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = None;
    }

    /// Draw one value from the configured distribution.
    pub fn sample(&mut self) -> f64 {
        let seed = self.seed;
        let rng = self.rng.get_or_insert_with(|| StdRng::seed_from_u64(seed));
        match self.distribution {
            NoiseDistribution::Uniform { low, high } => {
                if high <= low {
                    low
                } else {
                    rng.gen_range(low..high)
                }
            }
            NoiseDistribution::Normal { mean, std_dev } => {
                // Box-Muller transform over the uniform source.
                let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
                let u2: f64 = rng.gen::<f64>();
                let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
                mean + std_dev * z
            }
        }
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(NoiseDistribution::default(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut r = Randomizer::uniform(-0.5, 0.5, 7);
        for _ in 0..1000 {
            let v = r.sample();
            assert!((-0.5..0.5).contains(&v));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Randomizer::uniform(0.0, 1.0, 42);
        let mut b = Randomizer::uniform(0.0, 1.0, 42);
        for _ in 0..16 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = Randomizer::normal(0.0, 1.0, 3);
        a.sample();
        let mut b = a.clone();
        // Clones replay the same stream from the captured state...
        assert_eq!(a.sample(), b.sample());
        // ...but advancing one does not advance the other.
        let x2 = a.sample();
        let x3 = a.sample();
        assert_ne!(x2, x3);
        assert_eq!(b.sample(), x2);
        assert_eq!(b.sample(), x3);
    }

    #[test]
    fn test_normal_moments() {
        let mut r = Randomizer::normal(2.0, 0.5, 11);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| r.sample()).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        assert!((mean - 2.0).abs() < 0.02);
        assert!((var.sqrt() - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_degenerate_uniform_range() {
        let mut r = Randomizer::uniform(1.0, 1.0, 0);
        assert_eq!(r.sample(), 1.0);
    }
}
