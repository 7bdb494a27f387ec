//! Error types for key, ciphertext, and parameter handling.
//!
//! Decryption mismatches are deliberately absent: decapsulation always
//! returns a shared secret and handles forgeries by implicit rejection.

use thiserror::Error;

/// Errors surfaced by the TiGER KEM and its PKE core.
#[derive(Debug, Error)]
pub enum TigerError {
    /// A parameter set failed validation before any key material was made.
    #[error("invalid parameter set: {0}")]
    InvalidParameters(&'static str),

    /// A serialized key had the wrong length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required byte length for this parameter set.
        expected: usize,
        /// Byte length that was supplied.
        actual: usize,
    },

    /// A serialized ciphertext had the wrong length.
    #[error("invalid ciphertext length: expected {expected}, got {actual}")]
    InvalidCiphertextLength {
        /// Required byte length for this parameter set.
        expected: usize,
        /// Byte length that was supplied.
        actual: usize,
    },

    /// A plaintext message had the wrong length for the parameter set.
    #[error("invalid message length: expected {expected}, got {actual}")]
    InvalidMessageLength {
        /// Required byte length (d / 8).
        expected: usize,
        /// Byte length that was supplied.
        actual: usize,
    },

    /// The operating system entropy source failed.
    #[error("entropy source failure: {0}")]
    Entropy(String),
}
