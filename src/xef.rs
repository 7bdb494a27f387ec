//! XEf inner error-correcting code.
//!
//! Systematic code over d message bits with d parity bits split across a
//! bank of 2f registers whose lengths are the per-level tables in the
//! parameter modules. Register i of length l_i stores, at position p, the
//! XOR of all message bits whose index is congruent to p mod l_i.
//!
//! Decoding recomputes the parities from the received message part, XORs
//! them against the received parity part to get per-register syndromes,
//! and counts for every message bit how many registers flag its residue
//! class. A bit in error is flagged by nearly all registers while a clean
//! bit collects at most one flag per corrupted bit, so flipping above the
//! threshold f corrects up to f errors. A second round clears residual
//! flips; with more than f errors the output is undefined but the decoder
//! never fails loudly.

use crate::param::ParameterSet;

#[inline]
fn bit(bytes: &[u8], i: usize) -> u8 {
    (bytes[i >> 3] >> (i & 7)) & 1
}

#[inline]
fn set_bit(bytes: &mut [u8], i: usize) {
    bytes[i >> 3] |= 1 << (i & 7);
}

#[inline]
fn flip_bit(bytes: &mut [u8], i: usize) {
    bytes[i >> 3] ^= 1 << (i & 7);
}

pub(crate) struct Xef;

impl Xef {
    /// Encodes d message bits to a 2d-bit systematic codeword:
    /// the message followed by each register's parities in table order.
    pub fn encode<P: ParameterSet>(msg: &[u8]) -> Vec<u8> {
        debug_assert_eq!(msg.len(), P::MSG_BYTES);
        let d = P::D;
        let mut codeword = vec![0u8; P::CODEWORD_BYTES];
        codeword[..msg.len()].copy_from_slice(msg);

        let mut offset = d;
        for &len in P::xef_registers() {
            for p in 0..len {
                let mut parity = 0u8;
                let mut j = p;
                while j < d {
                    parity ^= bit(msg, j);
                    j += len;
                }
                if parity == 1 {
                    set_bit(&mut codeword, offset + p);
                }
            }
            offset += len;
        }
        codeword
    }

    /// Decodes a 2d-bit codeword carrying up to f bit errors back to the
    /// d-bit message.
    pub fn decode<P: ParameterSet>(codeword: &[u8]) -> Vec<u8> {
        debug_assert_eq!(codeword.len(), P::CODEWORD_BYTES);
        let d = P::D;
        let registers = P::xef_registers();
        let mut msg = codeword[..P::MSG_BYTES].to_vec();

        // Two correction rounds; once the syndromes are clear the second
        // round is a no-op.
        for _ in 0..2 {
            let mut syndromes: Vec<Vec<u8>> = Vec::with_capacity(registers.len());
            let mut offset = d;
            for &len in registers {
                let mut syndrome = vec![0u8; len];
                for (p, s) in syndrome.iter_mut().enumerate() {
                    let mut parity = bit(codeword, offset + p);
                    let mut j = p;
                    while j < d {
                        parity ^= bit(&msg, j);
                        j += len;
                    }
                    *s = parity;
                }
                offset += len;
                syndromes.push(syndrome);
            }

            // Snapshot the votes before flipping: all bits of a round are
            // judged against the same syndromes.
            let mut flips = Vec::new();
            for j in 0..d {
                let votes: usize = registers
                    .iter()
                    .zip(&syndromes)
                    .map(|(&len, syndrome)| usize::from(syndrome[j % len]))
                    .sum();
                if votes > P::F {
                    flips.push(j);
                }
            }
            if flips.is_empty() {
                break;
            }
            for j in flips {
                flip_bit(&mut msg, j);
            }
        }

        msg
    }
}
