//! Concatenated code combining XEf and D2.
//!
//! Encode: message -> XEf (2d-bit systematic codeword) -> D2 (polynomial
//! at amplitude q/2). Decode: polynomial -> D2 threshold bits -> XEf
//! correction -> message. D2 soaks up the per-coefficient LWE noise and
//! XEf corrects the residual bit errors.

use crate::d2::D2;
use crate::param::ParameterSet;
use crate::poly::Poly;
use crate::xef::Xef;

pub(crate) struct Concat;

impl Concat {
    /// Encodes a d-bit message into a polynomial with bit amplitudes at
    /// q/2. The amplitude is pinned here; the PKE layer adds no further
    /// scaling.
    pub fn encode<P: ParameterSet>(msg: &[u8]) -> Poly<P> {
        let codeword = Xef::encode::<P>(msg);
        D2::encode::<P>(&codeword)
    }

    /// Decodes a polynomial with amplitudes near 0 or q/2 back to the
    /// d-bit message.
    pub fn decode<P: ParameterSet>(poly: &Poly<P>) -> Vec<u8> {
        let codeword = D2::decode::<P>(poly);
        Xef::decode::<P>(&codeword)
    }
}
