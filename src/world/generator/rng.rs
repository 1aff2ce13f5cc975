use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Deterministic random stream. Output depends only on the seed and call order.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha12Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}
