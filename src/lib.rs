#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//!
//! # Security Warning
//!
//! **DO NOT USE THIS LIBRARY IN PRODUCTION.**
//!
//! This is an educational implementation for learning and experimentation.
//! It has not been audited, may contain timing side-channels beyond the
//! guarded comparisons, and provides no security guarantees.
//!
//! # Usage
//!
//! ```
//! use tigerkem::kem::TigerKem;
//! use tigerkem::tiger128::Tiger128Params;
//! use tigerkem::OsEntropy;
//!
//! # fn main() -> Result<(), tigerkem::TigerError> {
//! let mut rng = OsEntropy;
//! let (pk, sk) = TigerKem::keygen::<Tiger128Params>(&mut rng)?;
//! let (ct, ss_sender) = TigerKem::encaps::<Tiger128Params>(&mut rng, &pk)?;
//! let ss_receiver = TigerKem::decaps::<Tiger128Params>(&pk, &sk, &ct)?;
//! assert_eq!(ss_sender, ss_receiver);
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
mod test_util;

/// Concatenated code: XEf composed with D2.
mod concat;

/// D2 repetition code.
mod d2;

/// XEf parity-register code.
mod xef;

/// Polynomial arithmetic in Z_256[X] / (X^n + 1).
mod poly;

/// Seeded samplers.
mod sample;

/// SHAKE256 / SHA3-256 oracle.
mod xof;

mod error;
mod param;
mod rng;

/// IND-CPA encryption core.
pub mod pke;

/// IND-CCA key encapsulation.
pub mod kem;

pub use error::TigerError;
pub use param::{ParameterSet, Seed, validate};
pub use rng::{EntropySource, OsEntropy};

/// TiGER128 parameter set (NIST security level 1).
pub mod tiger128 {
    use super::param::ParameterSet;

    /// XEf parity register lengths for the 3-error code. Pairwise coprime
    /// with every pair product above the 128-bit message span, so no two
    /// bit positions share more than one register.
    static XEF_REGISTERS: [usize; 6] = [13, 17, 19, 23, 27, 29];

    /// TiGER128 parameter set implementation.
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct Tiger128Params;

    impl ParameterSet for Tiger128Params {
        const N: usize = 512;
        const P_MOD: u32 = 128;
        const K1: u32 = 256;
        const K2: u32 = 256;
        const HS: usize = 160;
        const HR: usize = 128;
        const HE: usize = 32;
        const D: usize = 128;
        const F: usize = 3;
        const U_SIZE: usize = 16;
        const LEVEL: &'static str = "TiGER128";

        fn xef_registers() -> &'static [usize] {
            &XEF_REGISTERS
        }
    }
}

/// TiGER192 parameter set (NIST security level 3).
pub mod tiger192 {
    use super::param::ParameterSet;

    /// XEf parity register lengths for the 5-error code.
    static XEF_REGISTERS: [usize; 10] = [16, 17, 19, 23, 25, 27, 29, 31, 33, 36];

    /// TiGER192 parameter set implementation.
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct Tiger192Params;

    impl ParameterSet for Tiger192Params {
        const N: usize = 1024;
        const P_MOD: u32 = 128;
        const K1: u32 = 128;
        const K2: u32 = 128;
        const HS: usize = 84;
        const HR: usize = 84;
        const HE: usize = 32;
        const D: usize = 256;
        const F: usize = 5;
        const U_SIZE: usize = 32;
        const LEVEL: &'static str = "TiGER192";

        fn xef_registers() -> &'static [usize] {
            &XEF_REGISTERS
        }
    }
}

/// TiGER256 parameter set (NIST security level 5).
pub mod tiger256 {
    use super::param::ParameterSet;

    /// XEf parity register lengths for the 5-error code.
    static XEF_REGISTERS: [usize; 10] = [16, 17, 19, 23, 25, 27, 29, 31, 33, 36];

    /// TiGER256 parameter set implementation.
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct Tiger256Params;

    impl ParameterSet for Tiger256Params {
        const N: usize = 1024;
        const P_MOD: u32 = 128;
        const K1: u32 = 128;
        const K2: u32 = 128;
        const HS: usize = 198;
        const HR: usize = 198;
        const HE: usize = 32;
        const D: usize = 256;
        const F: usize = 5;
        const U_SIZE: usize = 32;
        const LEVEL: &'static str = "TiGER256";

        fn xef_registers() -> &'static [usize] {
            &XEF_REGISTERS
        }
    }
}
