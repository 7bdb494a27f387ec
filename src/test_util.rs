use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};

use crate::error::TigerError;
use crate::rng::EntropySource;

/// Deterministic entropy source for repeatable tests.
pub struct TestRng {
    rng: ChaCha8Rng,
}

impl TestRng {
    pub fn new() -> Self {
        Self::seeded(0xdead_beef)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for TestRng {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), TigerError> {
        self.rng.fill_bytes(buf);
        Ok(())
    }
}
