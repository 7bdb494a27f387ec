//! Hash oracle: SHAKE256 XOF and SHA3-256 wrappers.
//!
//! TiGER treats the Keccak permutation as an external oracle with a plain
//! bytes-in/bytes-out contract: SHAKE256 expands seeds into polynomials
//! and sampler streams, SHA3-256 turns the encapsulation message into the
//! encryption coin.

use sha3::digest::{Digest, ExtendableOutput, XofReader};
use sha3::{Sha3_256, Shake256};

use crate::param::Seed;

/// SHAKE256(input) truncated to fill `out`.
pub(crate) fn shake256(input: &[u8], out: &mut [u8]) {
    let mut hasher = Shake256::default();
    sha3::digest::Update::update(&mut hasher, input);
    hasher.finalize_xof().read(out);
}

/// SHAKE256(input) truncated to `len` bytes.
pub(crate) fn shake256_vec(input: &[u8], len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    shake256(input, &mut out);
    out
}

/// SHA3-256(input).
pub(crate) fn sha3_256(input: &[u8]) -> [u8; 32] {
    let digest = Sha3_256::digest(input);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Derives an independent 32-byte seed from a base seed and a counter:
/// SHAKE256(base || counter as 4 little-endian bytes, 32).
///
/// Counters 0 and 1 split an encryption coin into the e1 and e2 seeds.
pub(crate) fn derive_seed(base: &Seed, counter: u32) -> Seed {
    let mut input = [0u8; 36];
    input[..32].copy_from_slice(base);
    input[32..].copy_from_slice(&counter.to_le_bytes());
    let mut out = [0u8; 32];
    shake256(&input, &mut out);
    out
}
