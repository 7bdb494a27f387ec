//! IND-CCA key encapsulation via the Fujisaki-Okamoto transform.
//!
//! Encapsulation encrypts a random message delta under the coin
//! SHA3-256(delta) and hashes ciphertext and message into the shared
//! secret. Decapsulation decrypts, re-encrypts deterministically, and
//! compares ciphertexts in constant time; on mismatch the hash input
//! swaps delta for the per-key random value u, so a forged ciphertext
//! yields a pseudo-random secret instead of an error (implicit
//! rejection). The swap is a byte-mask blend, never a branch.

use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::error::TigerError;
use crate::param::{ParameterSet, validate};
use crate::pke::{PkeCiphertext, PkePublicKey, PkeSecretKey, TigerPke};
use crate::poly::Poly;
use crate::rng::EntropySource;
use crate::xof::{sha3_256, shake256};

/// KEM secret key: the PKE secret plus the implicit-rejection value u.
///
/// Both components are wiped on drop.
#[derive(Clone, Debug)]
pub struct KemSecretKey<P: ParameterSet> {
    pub(crate) pke: PkeSecretKey<P>,
    pub(crate) u: Vec<u8>,
}

impl<P: ParameterSet> KemSecretKey<P> {
    /// Serializes to `[s dense: n bytes][u: u_size bytes]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(P::SK_BYTES);
        out.extend_from_slice(self.pke.s.as_slice());
        out.extend_from_slice(&self.u);
        out
    }

    /// Parses a serialized secret key, validating the length first.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TigerError> {
        if bytes.len() != P::SK_BYTES {
            return Err(TigerError::InvalidKeyLength {
                expected: P::SK_BYTES,
                actual: bytes.len(),
            });
        }
        let s = Poly::decompress(&bytes[..P::N], 8);
        let u = bytes[P::N..].to_vec();
        Ok(Self {
            pke: PkeSecretKey { s },
            u,
        })
    }
}

impl<P: ParameterSet> Zeroize for KemSecretKey<P> {
    fn zeroize(&mut self) {
        self.pke.zeroize();
        self.u.zeroize();
    }
}

impl<P: ParameterSet> Drop for KemSecretKey<P> {
    fn drop(&mut self) {
        self.u.zeroize();
        // self.pke wipes itself.
    }
}

/// 32-byte shared secret, wiped on drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedSecret([u8; 32]);

impl SharedSecret {
    /// Byte view of the secret.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Zeroize for SharedSecret {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// TiGER's IND-CCA key encapsulation mechanism.
pub struct TigerKem;

impl TigerKem {
    /// Generates a keypair from fresh OS entropy.
    pub fn keygen<P: ParameterSet>(
        rng: &mut dyn EntropySource,
    ) -> Result<(PkePublicKey<P>, KemSecretKey<P>), TigerError> {
        let (pk, pke_sk) = TigerPke::keygen::<P>(rng)?;
        let mut u = vec![0u8; P::U_SIZE];
        rng.fill(&mut u)?;
        Ok((pk, KemSecretKey { pke: pke_sk, u }))
    }

    /// Deterministic keypair derivation from a 64-byte master seed
    /// (seed_a = bytes 0..32, seed_s = bytes 32..64) and an explicit
    /// implicit-rejection value.
    pub fn keygen_deterministic<P: ParameterSet>(
        master: &[u8; 64],
        u: &[u8],
    ) -> Result<(PkePublicKey<P>, KemSecretKey<P>), TigerError> {
        validate::<P>()?;
        if u.len() != P::U_SIZE {
            return Err(TigerError::InvalidKeyLength {
                expected: P::U_SIZE,
                actual: u.len(),
            });
        }
        let mut seed_a = [0u8; 32];
        seed_a.copy_from_slice(&master[..32]);
        let mut seed_s = Zeroizing::new([0u8; 32]);
        seed_s.copy_from_slice(&master[32..]);
        let (pk, pke_sk) = TigerPke::keygen_from_seeds::<P>(&seed_a, &seed_s);
        Ok((
            pk,
            KemSecretKey {
                pke: pke_sk,
                u: u.to_vec(),
            },
        ))
    }

    /// Encapsulates a fresh shared secret to `pk`.
    pub fn encaps<P: ParameterSet>(
        rng: &mut dyn EntropySource,
        pk: &PkePublicKey<P>,
    ) -> Result<(PkeCiphertext<P>, SharedSecret), TigerError> {
        let mut delta = Zeroizing::new(vec![0u8; P::MSG_BYTES]);
        rng.fill(&mut delta)?;
        Self::encaps_deterministic::<P>(pk, &delta)
    }

    /// Encapsulates a caller-chosen d-bit message.
    ///
    /// The encryption coin is SHA3-256(delta) and the shared secret is
    /// SHAKE256(c || delta, 32).
    pub fn encaps_deterministic<P: ParameterSet>(
        pk: &PkePublicKey<P>,
        delta: &[u8],
    ) -> Result<(PkeCiphertext<P>, SharedSecret), TigerError> {
        if delta.len() != P::MSG_BYTES {
            return Err(TigerError::InvalidMessageLength {
                expected: P::MSG_BYTES,
                actual: delta.len(),
            });
        }
        let coin = Zeroizing::new(sha3_256(delta));
        let ct = TigerPke::encrypt::<P>(pk, delta, &coin)?;
        let ss = Self::shared_secret(&ct.to_bytes(), delta);
        Ok((ct, ss))
    }

    /// Recovers the shared secret from a ciphertext.
    ///
    /// Always returns a 32-byte value: decrypt, re-encrypt under
    /// SHA3-256 of the decryption, compare the packed ciphertexts in
    /// constant time, and blend the hash suffix between the decrypted
    /// message and u with the resulting byte mask.
    pub fn decaps<P: ParameterSet>(
        pk: &PkePublicKey<P>,
        sk: &KemSecretKey<P>,
        ct: &PkeCiphertext<P>,
    ) -> Result<SharedSecret, TigerError> {
        let delta_hat = TigerPke::decrypt::<P>(&sk.pke, ct);
        let coin = Zeroizing::new(sha3_256(&delta_hat));
        let ct_prime = TigerPke::encrypt::<P>(pk, &delta_hat, &coin)?;

        let ct_bytes = ct.to_bytes();
        let matches = ct_bytes.as_slice().ct_eq(&ct_prime.to_bytes());

        // u_size == d/8 by parameter validation, so the two candidate
        // suffixes have equal length and blend bytewise.
        let mut suffix = Zeroizing::new(vec![0u8; P::U_SIZE]);
        for (i, out) in suffix.iter_mut().enumerate() {
            *out = u8::conditional_select(&sk.u[i], &delta_hat[i], matches);
        }

        Ok(Self::shared_secret(&ct_bytes, &suffix))
    }

    /// ss = SHAKE256(ct || suffix, 32).
    fn shared_secret(ct_bytes: &[u8], suffix: &[u8]) -> SharedSecret {
        let mut input = Zeroizing::new(Vec::with_capacity(ct_bytes.len() + suffix.len()));
        input.extend_from_slice(ct_bytes);
        input.extend_from_slice(suffix);
        let mut ss = [0u8; 32];
        shake256(&input, &mut ss);
        SharedSecret(ss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TestRng;
    use crate::tiger128::Tiger128Params;
    use crate::tiger192::Tiger192Params;
    use crate::tiger256::Tiger256Params;

    fn roundtrip<P: ParameterSet>() {
        let mut rng = TestRng::new();
        let (pk, sk) = TigerKem::keygen::<P>(&mut rng).unwrap();
        let (ct, ss_sender) = TigerKem::encaps::<P>(&mut rng, &pk).unwrap();
        let ss_receiver = TigerKem::decaps::<P>(&pk, &sk, &ct).unwrap();
        assert_eq!(ss_sender, ss_receiver);
    }

    #[test]
    fn roundtrip_tiger128() {
        roundtrip::<Tiger128Params>();
    }

    #[test]
    fn roundtrip_tiger192() {
        roundtrip::<Tiger192Params>();
    }

    #[test]
    fn roundtrip_tiger256() {
        roundtrip::<Tiger256Params>();
    }

    #[test]
    fn corrupted_ciphertext_is_implicitly_rejected() {
        let mut rng = TestRng::new();
        let (pk, sk) = TigerKem::keygen::<Tiger128Params>(&mut rng).unwrap();
        let (ct, ss) = TigerKem::encaps::<Tiger128Params>(&mut rng, &pk).unwrap();

        let mut bytes = ct.to_bytes();
        bytes[0] ^= 0x01;
        let forged = PkeCiphertext::<Tiger128Params>::from_bytes(&bytes).unwrap();
        let ss_forged = TigerKem::decaps::<Tiger128Params>(&pk, &sk, &forged).unwrap();
        assert_ne!(ss, ss_forged);

        // Rejection is deterministic in (sk, ct).
        let ss_again = TigerKem::decaps::<Tiger128Params>(&pk, &sk, &forged).unwrap();
        assert_eq!(ss_forged, ss_again);
    }

    #[test]
    fn decaps_with_wrong_key_disagrees() {
        let mut rng = TestRng::new();
        let (pk1, _sk1) = TigerKem::keygen::<Tiger128Params>(&mut rng).unwrap();
        let (_pk2, sk2) = TigerKem::keygen::<Tiger128Params>(&mut rng).unwrap();
        let (ct, ss) = TigerKem::encaps::<Tiger128Params>(&mut rng, &pk1).unwrap();
        let ss_wrong = TigerKem::decaps::<Tiger128Params>(&pk1, &sk2, &ct).unwrap();
        assert_ne!(ss, ss_wrong);
    }

    #[test]
    fn encaps_is_deterministic_in_delta() {
        let master: [u8; 64] = core::array::from_fn(|i| i as u8);
        let (pk, _sk) =
            TigerKem::keygen_deterministic::<Tiger128Params>(&master, &[0x55; 16]).unwrap();
        let delta = [0x0Fu8; 16];
        let (ct1, ss1) = TigerKem::encaps_deterministic::<Tiger128Params>(&pk, &delta).unwrap();
        let (ct2, ss2) = TigerKem::encaps_deterministic::<Tiger128Params>(&pk, &delta).unwrap();
        assert_eq!(ct1, ct2);
        assert_eq!(ss1, ss2);
    }

    #[test]
    fn secret_key_serialization_roundtrips() {
        let mut rng = TestRng::new();
        let (pk, sk) = TigerKem::keygen::<Tiger256Params>(&mut rng).unwrap();
        let bytes = sk.to_bytes();
        assert_eq!(bytes.len(), Tiger256Params::SK_BYTES);
        let sk2 = KemSecretKey::<Tiger256Params>::from_bytes(&bytes).unwrap();

        let (ct, ss) = TigerKem::encaps::<Tiger256Params>(&mut rng, &pk).unwrap();
        assert_eq!(TigerKem::decaps::<Tiger256Params>(&pk, &sk2, &ct).unwrap(), ss);
    }

    #[test]
    fn short_secret_key_is_rejected() {
        assert!(matches!(
            KemSecretKey::<Tiger128Params>::from_bytes(&[0u8; 527]),
            Err(TigerError::InvalidKeyLength { expected: 528, actual: 527 })
        ));
    }
}
