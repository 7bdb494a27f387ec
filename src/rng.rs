//! Entropy source abstraction.
//!
//! The OS entropy source is an injectable collaborator: production code
//! uses [`OsEntropy`], tests inject a deterministic byte stream. A short
//! read or unavailable source is fatal to the current operation.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::error::TigerError;

/// Source of cryptographically strong uniform bytes.
pub trait EntropySource {
    /// Fills `buf` with fresh random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), TigerError>;
}

/// Operating-system entropy (getrandom/getentropy equivalent).
#[derive(Default, Clone, Copy, Debug)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), TigerError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| TigerError::Entropy(e.to_string()))
    }
}
