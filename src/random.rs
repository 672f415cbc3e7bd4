use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

// Uniform random draws used by the chaos endpoints.
pub trait RandomSource: Send + Sync {
    // Integer in `[low, high)`.
    fn next_in_range(&self, low: i64, high: i64) -> i64;

    // Float in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

// Per-thread generator, the default when no seed is given
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, low: i64, high: i64) -> i64 {
        rand::rng().random_range(low..high)
    }

    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

// Seeded generator shared by all requests; same seed, same sequence of draws.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&self, low: i64, high: i64) -> i64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(low..high)
    }

    fn next_unit(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random::<f64>()
    }
}
