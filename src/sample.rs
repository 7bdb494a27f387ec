//! Deterministic sampling from 32-byte seeds.
//!
//! Uniform polynomials come straight out of SHAKE256. Sparse ternary
//! polynomials with an exact Hamming weight come from a truncated
//! Fisher-Yates shuffle over the index set: a 16-bit window per draw
//! keeps the modulo bias negligible for n <= 1024.
//!
//! Sampling touches secrets; the expanded randomness is wiped on exit.

use zeroize::Zeroizing;

use crate::param::{ParameterSet, Seed};
use crate::poly::{Poly, SparseTernary, TernaryTerm};
use crate::xof::{shake256, shake256_vec};

/// Uniform polynomial: SHAKE256(seed, n) bytes as coefficients.
pub(crate) fn sample_uniform<P: ParameterSet>(seed: &Seed) -> Poly<P> {
    let mut coeffs = vec![0u8; P::N];
    shake256(seed, &mut coeffs);
    Poly::from_coeffs(coeffs)
}

/// Sparse ternary polynomial with exactly `weight` non-zero terms.
///
/// The seed expands to 3 * weight bytes: 2 bytes per position draw and
/// one byte per sign. Draw i reads a big-endian 16-bit value r and swaps
/// positions[i] with positions[i + (r mod (n - i))], selecting `weight`
/// distinct indices; sign i is +1 iff the low bit of byte 2*weight + i
/// is set.
pub(crate) fn sample_ternary<P: ParameterSet>(weight: usize, seed: &Seed) -> SparseTernary {
    debug_assert!(weight <= P::N);
    let stream = Zeroizing::new(shake256_vec(seed, 3 * weight));

    let mut positions: Vec<usize> = (0..P::N).collect();
    for i in 0..weight {
        let r = u16::from_be_bytes([stream[2 * i], stream[2 * i + 1]]) as usize;
        let j = i + r % (P::N - i);
        positions.swap(i, j);
    }

    (0..weight)
        .map(|i| {
            let sign: i8 = if stream[2 * weight + i] & 1 == 1 { 1 } else { -1 };
            TernaryTerm {
                index: positions[i],
                sign,
            }
        })
        .collect()
}

/// Dense form of [`sample_ternary`].
pub(crate) fn sample_ternary_poly<P: ParameterSet>(weight: usize, seed: &Seed) -> Poly<P> {
    let terms = Zeroizing::new(sample_ternary::<P>(weight, seed));
    Poly::from_sparse(&terms)
}
