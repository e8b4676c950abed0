#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;
use rand::rngs::SmallRng;

/// Provides the way to use randomized values in generic way.
pub trait Random: Send + Sync {
    /// Returns RNG. Every call of a seeded implementation returns a generator in the same state.
    fn get_rng(&self) -> SmallRng;
}

/// A default random implementation.
#[derive(Default)]
pub struct DefaultRandom {
    seed: Option<u64>,
}

impl DefaultRandom {
    /// Creates a new instance `DefaultRandom` with seed.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Creates a new instance `DefaultRandom` which produces the same sequence on every run.
    pub fn new_repeatable() -> Self {
        Self::new_with_seed(0)
    }

    /// Returns a seed if it is specified.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Random for DefaultRandom {
    fn get_rng(&self) -> SmallRng {
        if let Some(seed) = self.seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_rng(thread_rng()).expect("cannot get RNG")
        }
    }
}
