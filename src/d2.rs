//! D2 outer repetition code.
//!
//! Each codeword bit lands on two adjacent ring coefficients at amplitude
//! q/2, giving the XEf layer redundancy against the LWE noise: a decode
//! reads the unsigned sum of each coefficient pair against the q/2
//! threshold, so a single coefficient pushed off its level does not flip
//! the bit.

use crate::param::ParameterSet;
use crate::poly::Poly;

pub(crate) struct D2;

impl D2 {
    /// Spreads `2d` bits over the first `4d` coefficients: bit i sets
    /// coefficients 2i and 2i+1 to 128 if set, 0 otherwise. Bits are read
    /// low-order-first within each byte.
    pub fn encode<P: ParameterSet>(bits: &[u8]) -> Poly<P> {
        let num_bits = 2 * P::D;
        debug_assert_eq!(bits.len(), P::CODEWORD_BYTES);
        debug_assert!(2 * num_bits <= P::N);

        let mut poly = Poly::zero();
        for i in 0..num_bits {
            let bit = (bits[i / 8] >> (i % 8)) & 1;
            let value = if bit == 1 { 128 } else { 0 };
            poly[2 * i] = value;
            poly[2 * i + 1] = value;
        }
        poly
    }

    /// Recovers `2d` bits: bit i is 1 iff the unsigned sum of coefficients
    /// 2i and 2i+1 reaches 128.
    pub fn decode<P: ParameterSet>(poly: &Poly<P>) -> Vec<u8> {
        let num_bits = 2 * P::D;
        let mut bits = vec![0u8; P::CODEWORD_BYTES];
        for i in 0..num_bits {
            let sum = u16::from(poly[2 * i]) + u16::from(poly[2 * i + 1]);
            if sum >= 128 {
                bits[i / 8] |= 1 << (i % 8);
            }
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiger128::Tiger128Params;
    use crate::tiger192::Tiger192Params;

    #[test]
    fn alternating_bits_duplicate_into_pairs() {
        // Bit sequence 1,0,1,0,... maps to coefficient pairs
        // (128,128),(0,0),(128,128),(0,0),...
        let mut bits = vec![0u8; Tiger128Params::CODEWORD_BYTES];
        bits[0] = 0x55;
        let poly = D2::encode::<Tiger128Params>(&bits);
        let expected: [u8; 16] = [
            128, 128, 0, 0, 128, 128, 0, 0, 128, 128, 0, 0, 128, 128, 0, 0,
        ];
        for (i, &e) in expected.iter().enumerate() {
            assert_eq!(poly[i], e);
        }
        assert_eq!(D2::decode::<Tiger128Params>(&poly), bits);
    }

    #[test]
    fn roundtrip_full_codeword() {
        fn check<P: ParameterSet>() {
            let bits: Vec<u8> = (0..P::CODEWORD_BYTES).map(|i| (i * 37 + 1) as u8).collect();
            let poly = D2::encode::<P>(&bits);
            assert_eq!(D2::decode::<P>(&poly), bits);
        }
        check::<Tiger128Params>();
        check::<Tiger192Params>();
    }

    #[test]
    fn decode_tolerates_one_degraded_coefficient_per_pair() {
        let mut bits = vec![0u8; Tiger128Params::CODEWORD_BYTES];
        bits[0] = 0b0000_0011;
        let mut poly = D2::encode::<Tiger128Params>(&bits);
        // One coefficient of a set pair collapses to 0, its twin holds.
        poly[0] = 0;
        // One coefficient of a clear pair drifts upward but the pair sum
        // stays below the threshold.
        poly[4] = 60;
        assert_eq!(D2::decode::<Tiger128Params>(&poly), bits);
    }

    #[test]
    fn pair_sum_is_unsigned_not_modular() {
        let mut bits = vec![0u8; Tiger128Params::CODEWORD_BYTES];
        bits[0] = 1;
        let mut poly = D2::encode::<Tiger128Params>(&bits);
        // 128 + 128 = 256 would wrap to 0 mod 256; the decoder must not.
        poly[0] = 128;
        poly[1] = 128;
        let decoded = D2::decode::<Tiger128Params>(&poly);
        assert_eq!(decoded[0] & 1, 1);
    }
}
