//! Random number generation for dungeon generation
//!
//! Uses a seeded ChaCha RNG so every room and dungeon can be replayed from its seed.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Generator random number source
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - a deserialized generator restarts from its seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Create from an optional seed, drawing from entropy when absent
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a seed for a child generator
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns 1..n
    ///
    /// Returns 0 if n is 0.
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }

    /// Uniform integer in `lo..=hi`
    ///
    /// Returns `None` when the range is empty.
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> Option<i32> {
        if lo > hi {
            return None;
        }
        Some(self.rng.gen_range(lo..=hi))
    }

    /// Uniform float in `[0, 1)`
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.r#gen()
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// Returns true with probability percent/100
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rn2(100) < percent
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len() as u32) as usize])
        }
    }

    /// Pick an index with probability proportional to its weight
    ///
    /// Returns `None` if the weights are empty, all zero, negative or not finite.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.rng))
    }

    /// Pick `amount` distinct indices from `0..len`, in draw order
    ///
    /// `amount` is clamped to `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
