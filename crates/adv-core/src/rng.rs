//! Seeded random number generation
//!
//! Uses a seeded ChaCha RNG so a map can be rebuilt from its seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Generator random number source
///
/// Wraps ChaCha8Rng for reproducible generation. Every generation step takes
/// one of these by `&mut`; there is no process-wide generator.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Only the seed is serialized; the stream restarts from it on deserialize
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

    /// Derive an independent RNG for a named sub-stream.
    ///
    /// The derived seed is a function of the base seed and the key bytes only,
    /// so it is stable across runs, platforms and call order.
    pub fn derive(seed: u64, key: &[u8]) -> Self {
        Self::new(xxh3_64_with_seed(key, seed))
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
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

    /// Uniform index into a collection of `len` items
    ///
    /// Returns 0 if len is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.index(items.len())])
        }
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    /// Pick `k` distinct elements, in draw order.
    ///
    /// Returns fewer than `k` items when the slice is shorter than `k`.
    pub fn sample<'a, T>(&mut self, items: &'a [T], k: usize) -> Vec<&'a T> {
        let mut pool: Vec<usize> = (0..items.len()).collect();
        let k = k.min(pool.len());
        for i in 0..k {
            let j = i + self.index(pool.len() - i);
            pool.swap(i, j);
        }
        pool[..k].iter().map(|&i| &items[i]).collect()
    }

    /// Generate a random coordinate in `[0, side) x [0, side)`
    pub fn random_coord(&mut self, side: u32) -> (u32, u32) {
        let x = self.rn2(side);
        let y = self.rn2(side);
        (x, y)
    }
}

/// Draw a fresh 32-bit seed for a new adventure
pub fn new_seed() -> u64 {
    u64::from(rand::random::<u32>())
}
