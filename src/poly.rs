//! Polynomial arithmetic in R_q = Z_256[X] / (X^n + 1).
//!
//! Coefficients are bytes and all arithmetic wraps mod 256, so the ring
//! operations reduce to wrapping byte arithmetic. Multiplication is
//! negacyclic: X^n = -1, so terms shifted past the top coefficient come
//! back with flipped sign. Hot paths multiply a dense polynomial by a
//! sparse ternary one in O(n * weight); the schoolbook multiplier exists
//! as the reference the sparse path is checked against.

use core::marker::PhantomData;
use core::ops::{Add, Index, IndexMut, Neg, Sub};

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::param::ParameterSet;

/// One non-zero term of a sparse ternary polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TernaryTerm {
    /// Coefficient index in [0, n).
    pub index: usize,
    /// Coefficient sign, +1 or -1.
    pub sign: i8,
}

impl Zeroize for TernaryTerm {
    fn zeroize(&mut self) {
        self.index.zeroize();
        self.sign.zeroize();
    }
}

/// A polynomial whose non-zero coefficients are all +-1, kept as an
/// ordered (index, sign) list with a fixed Hamming weight.
pub type SparseTernary = Vec<TernaryTerm>;

/// Dense polynomial with n byte coefficients in Z_256.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly<P: ParameterSet> {
    coeffs: Vec<u8>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> Poly<P> {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self {
            coeffs: vec![0u8; P::N],
            _params: PhantomData,
        }
    }

    /// Wraps n coefficients as a polynomial.
    pub(crate) fn from_coeffs(coeffs: Vec<u8>) -> Self {
        debug_assert_eq!(coeffs.len(), P::N);
        Self {
            coeffs,
            _params: PhantomData,
        }
    }

    /// The constant polynomial `v`.
    #[cfg(test)]
    pub(crate) fn constant(v: u8) -> Self {
        let mut p = Self::zero();
        p.coeffs[0] = v;
        p
    }

    /// Coefficient view.
    pub fn as_slice(&self) -> &[u8] {
        &self.coeffs
    }

    /// Coefficient-wise multiply by `f` mod 256. Used to lift message
    /// bits to amplitude q/2 and to expand b by q/p before b * r.
    pub fn scale(&self, f: u32) -> Self {
        let mut out = Self::zero();
        for (r, &c) in out.coeffs.iter_mut().zip(&self.coeffs) {
            *r = (u32::from(c) * f) as u8;
        }
        out
    }

    /// Coefficient-wise floor((x * num + den/2) / den) with x unsigned.
    ///
    /// This is the RLWR rounding: (p, q) derives b from a*s, and (2, q)
    /// decides each message bit during decryption.
    pub fn scale_round(&self, num: u32, den: u32) -> Self {
        let mut out = Self::zero();
        for (r, &c) in out.coeffs.iter_mut().zip(&self.coeffs) {
            let x = u32::from(c) * num;
            *r = ((x + den / 2) / den) as u8;
        }
        out
    }

    /// Negacyclic schoolbook multiplication.
    ///
    /// Accumulates the full length-2n product, then folds: coefficient i
    /// is t[i] - t[i+n] mod 256. Quadratic; kept for tests and as the
    /// reference for the sparse multiplier.
    pub fn mul_schoolbook(&self, other: &Self) -> Self {
        let n = P::N;
        let mut t = vec![0u8; 2 * n];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                t[i + j] = t[i + j].wrapping_add(a.wrapping_mul(b));
            }
        }
        let mut out = Self::zero();
        for i in 0..n {
            out.coeffs[i] = t[i].wrapping_sub(t[i + n]);
        }
        out
    }

    /// Multiplies by a sparse ternary polynomial in O(n * weight).
    ///
    /// Each term (j, sign) adds sign * self * X^j into the accumulator;
    /// X^j acts by rotation, and positions wrapping past n-1 contribute
    /// negated (X^n = -1).
    pub fn mul_sparse(&self, terms: &[TernaryTerm]) -> Self {
        let n = P::N;
        let mut out = Self::zero();
        for term in terms {
            let sign_byte: u8 = if term.sign >= 0 { 1 } else { 255 };
            for (i, &c) in self.coeffs.iter().enumerate() {
                let mut pos = i + term.index;
                let mut v = c.wrapping_mul(sign_byte);
                if pos >= n {
                    pos -= n;
                    v = v.wrapping_neg();
                }
                out.coeffs[pos] = out.coeffs[pos].wrapping_add(v);
            }
        }
        out
    }

    /// Packs the top `log_mod` bits of each coefficient into a
    /// little-endian bit stream of ceil(n * log_mod / 8) bytes.
    ///
    /// Lossy unless `log_mod` is 8: the dropped low bits are gone.
    pub fn compress(&self, log_mod: u32) -> Vec<u8> {
        if log_mod == 8 {
            return self.coeffs.clone();
        }
        let out_len = (P::N * log_mod as usize).div_ceil(8);
        let mut out = vec![0u8; out_len];
        let shift = 8 - log_mod;
        let mut buf: u32 = 0;
        let mut bits: u32 = 0;
        let mut oidx = 0;
        for &c in &self.coeffs {
            buf |= u32::from(c >> shift) << bits;
            bits += log_mod;
            while bits >= 8 {
                out[oidx] = (buf & 0xff) as u8;
                oidx += 1;
                buf >>= 8;
                bits -= 8;
            }
        }
        if bits > 0 {
            out[oidx] = (buf & 0xff) as u8;
        }
        out
    }

    /// Inverse of [`compress`](Self::compress): reads `log_mod` bits per
    /// coefficient and places them in the high bit positions, zero-filling
    /// the rest.
    pub fn decompress(bytes: &[u8], log_mod: u32) -> Self {
        let n = P::N;
        let mut out = Self::zero();
        if log_mod == 8 {
            out.coeffs.copy_from_slice(&bytes[..n]);
            return out;
        }
        let shift = 8 - log_mod;
        let mask = (1u32 << log_mod) - 1;
        let mut buf: u32 = 0;
        let mut bits: u32 = 0;
        let mut iidx = 0;
        for c in out.coeffs.iter_mut() {
            while bits < log_mod {
                buf |= u32::from(bytes[iidx]) << bits;
                iidx += 1;
                bits += 8;
            }
            *c = ((buf & mask) << shift) as u8;
            buf >>= log_mod;
            bits -= log_mod;
        }
        out
    }

    /// Extracts the (index, sign) list: coefficient 1 yields +1, 255
    /// yields -1, everything else is skipped.
    pub fn to_sparse(&self) -> SparseTernary {
        let mut terms = Vec::with_capacity(P::N / 4);
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 1 {
                terms.push(TernaryTerm { index: i, sign: 1 });
            } else if c == 255 {
                terms.push(TernaryTerm { index: i, sign: -1 });
            }
        }
        terms
    }

    /// Builds the dense form of a sparse ternary polynomial.
    pub fn from_sparse(terms: &[TernaryTerm]) -> Self {
        let mut out = Self::zero();
        for term in terms {
            out.coeffs[term.index] = if term.sign > 0 { 1 } else { 255 };
        }
        out
    }
}

impl<P: ParameterSet> Index<usize> for Poly<P> {
    type Output = u8;

    fn index(&self, i: usize) -> &u8 {
        &self.coeffs[i]
    }
}

impl<P: ParameterSet> IndexMut<usize> for Poly<P> {
    fn index_mut(&mut self, i: usize) -> &mut u8 {
        &mut self.coeffs[i]
    }
}

impl<P: ParameterSet> Add for &Poly<P> {
    type Output = Poly<P>;

    fn add(self, other: &Poly<P>) -> Poly<P> {
        let mut out = Poly::zero();
        for i in 0..P::N {
            out.coeffs[i] = self.coeffs[i].wrapping_add(other.coeffs[i]);
        }
        out
    }
}

impl<P: ParameterSet> Sub for &Poly<P> {
    type Output = Poly<P>;

    fn sub(self, other: &Poly<P>) -> Poly<P> {
        let mut out = Poly::zero();
        for i in 0..P::N {
            out.coeffs[i] = self.coeffs[i].wrapping_sub(other.coeffs[i]);
        }
        out
    }
}

impl<P: ParameterSet> Neg for &Poly<P> {
    type Output = Poly<P>;

    fn neg(self) -> Poly<P> {
        let mut out = Poly::zero();
        for i in 0..P::N {
            out.coeffs[i] = self.coeffs[i].wrapping_neg();
        }
        out
    }
}

impl<P: ParameterSet> ConstantTimeEq for Poly<P> {
    /// XOR-accumulated equality with no early exit.
    fn ct_eq(&self, other: &Self) -> Choice {
        self.coeffs.as_slice().ct_eq(other.coeffs.as_slice())
    }
}

impl<P: ParameterSet> Zeroize for Poly<P> {
    fn zeroize(&mut self) {
        self.coeffs.zeroize();
    }
}
