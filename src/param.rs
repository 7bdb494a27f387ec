//! Parameter sets and derived sizes.
//!
//! TiGER fixes q = 256 so every ring coefficient is one byte; the three
//! security levels vary the ring dimension, the sparse-ternary Hamming
//! weights, and the error-correcting code. All wire sizes derive from the
//! base parameters and are re-checked by [`validate`].

use core::fmt::Debug;

use crate::error::TigerError;

/// 32-byte seed used for polynomial expansion and key derivation.
pub type Seed = [u8; 32];

/// log2 of a power of two.
pub(crate) const fn log2_pow2(x: u32) -> u32 {
    x.trailing_zeros()
}

pub(crate) const fn is_power_of_two(x: u32) -> bool {
    x != 0 && x & (x - 1) == 0
}

/// Public key bytes: seed_a plus b packed at log2(p) bits per coefficient.
pub(crate) const fn pk_bytes(n: usize, p: u32) -> usize {
    32 + (n * log2_pow2(p) as usize).div_ceil(8)
}

/// Secret key bytes: dense s plus the implicit-rejection value u.
pub(crate) const fn sk_bytes(n: usize, u_size: usize) -> usize {
    n + u_size
}

/// Ciphertext bytes: c1 at log2(k1) and c2 at log2(k2) bits per coefficient.
pub(crate) const fn ct_bytes(n: usize, k1: u32, k2: u32) -> usize {
    (n * (log2_pow2(k1) + log2_pow2(k2)) as usize).div_ceil(8)
}

/// TiGER parameter set trait defining a security level.
///
/// Implementations exist for TiGER128, TiGER192, and TiGER256. All
/// arithmetic parameters are compile-time constants; the XEf parity
/// register table is the only per-level static data.
pub trait ParameterSet: Default + Clone + Debug + PartialEq + Eq {
    /// Ring dimension n: coefficients of Z_q[X] / (X^n + 1).
    const N: usize;

    /// RLWE modulus q. Fixed at 256 so coefficients are natural bytes.
    const Q: u32 = 256;

    /// RLWR rounding modulus p for the public vector b.
    const P_MOD: u32;

    /// Packing modulus for ciphertext component c1.
    const K1: u32;

    /// Packing modulus for ciphertext component c2.
    const K2: u32;

    /// Hamming weight of the secret s.
    const HS: usize;

    /// Hamming weight of the ephemeral r.
    const HR: usize;

    /// Hamming weight of the errors e1 and e2.
    const HE: usize;

    /// Message length in bits.
    const D: usize;

    /// Correction capacity of the XEf code in bits.
    const F: usize;

    /// Length in bytes of the implicit-rejection value u. Equal to the
    /// message byte length, so the decapsulation hash suffix can be
    /// blended between the two by byte mask.
    const U_SIZE: usize;

    /// Human-readable level tag, e.g. "TiGER128".
    const LEVEL: &'static str;

    /// Public key size in bytes: 32 (seed_a) + ceil(n * log2(p) / 8).
    const PK_BYTES: usize = pk_bytes(Self::N, Self::P_MOD);

    /// Secret key size in bytes: n (dense s) + u_size.
    const SK_BYTES: usize = sk_bytes(Self::N, Self::U_SIZE);

    /// Ciphertext size in bytes: ceil(n * (log2(k1) + log2(k2)) / 8).
    const CT_BYTES: usize = ct_bytes(Self::N, Self::K1, Self::K2);

    /// Message size in bytes: d / 8.
    const MSG_BYTES: usize = Self::D / 8;

    /// XEf codeword size in bytes: 2d / 8.
    const CODEWORD_BYTES: usize = 2 * Self::D / 8;

    /// Shared secret size in bytes.
    const SS_BYTES: usize = 32;

    /// XEf parity register lengths. The table has 2f entries summing to
    /// d, so the systematic codeword is exactly 2d bits.
    fn xef_registers() -> &'static [usize];
}

/// Checks a parameter set against the constraints every TiGER level must
/// satisfy. Key generation refuses to materialize keys for a set that
/// fails here.
pub fn validate<P: ParameterSet>() -> Result<(), TigerError> {
    if P::Q != 256 {
        return Err(TigerError::InvalidParameters("q must be 256"));
    }
    if !is_power_of_two(P::P_MOD) || !is_power_of_two(P::K1) || !is_power_of_two(P::K2) {
        return Err(TigerError::InvalidParameters("p, k1, k2 must be powers of two"));
    }
    if P::P_MOD > P::Q || P::K1 > P::Q || P::K2 > P::Q {
        return Err(TigerError::InvalidParameters("p, k1, k2 must divide q"));
    }
    if P::N != 512 && P::N != 1024 {
        return Err(TigerError::InvalidParameters("n must be 512 or 1024"));
    }
    if P::HS > P::N || P::HR > P::N || P::HE > P::N {
        return Err(TigerError::InvalidParameters("Hamming weights exceed dimension"));
    }
    if P::D != 128 && P::D != 192 && P::D != 256 {
        return Err(TigerError::InvalidParameters("message length d must be 128, 192, or 256"));
    }
    if P::F != 3 && P::F != 5 {
        return Err(TigerError::InvalidParameters("correction capacity f must be 3 or 5"));
    }
    if 4 * P::D > P::N {
        return Err(TigerError::InvalidParameters("D2 encoding needs 4d <= n"));
    }
    if P::U_SIZE != P::D / 8 {
        return Err(TigerError::InvalidParameters(
            "implicit-rejection blend needs u_size == d/8",
        ));
    }

    let registers = P::xef_registers();
    if registers.len() != 2 * P::F {
        return Err(TigerError::InvalidParameters("XEf needs 2f parity registers"));
    }
    if registers.iter().sum::<usize>() != P::D {
        return Err(TigerError::InvalidParameters("XEf register lengths must sum to d"));
    }

    // Derived sizes must agree with the closed-form formulas even if an
    // implementation overrides the trait defaults.
    if P::PK_BYTES != pk_bytes(P::N, P::P_MOD) {
        return Err(TigerError::InvalidParameters("pk_bytes mismatch"));
    }
    if P::SK_BYTES != sk_bytes(P::N, P::U_SIZE) {
        return Err(TigerError::InvalidParameters("sk_bytes mismatch"));
    }
    if P::CT_BYTES != ct_bytes(P::N, P::K1, P::K2) {
        return Err(TigerError::InvalidParameters("ct_bytes mismatch"));
    }

    Ok(())
}
