use thiserror::Error;

/// Errors produced by the Paillier scheme
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum PaillierError {
    /// A required argument is missing or empty
    #[error("Invalid parameter")]
    InvalidParameter,
    /// A key is malformed or violates a structural invariant
    #[error("Invalid key")]
    InvalidKey,
    /// The requested or deserialized modulus is below the minimum size
    #[error("Key length is below the minimum of {} bits", crate::MIN_KEY_BITS)]
    KeyTooShort,
    /// The plaintext is not in [0, N) or does not fit the output type
    #[error("Invalid plaintext")]
    InvalidPlaintext,
    /// The ciphertext is not in [0, N^2) or is not coprime to N
    #[error("Invalid ciphertext")]
    InvalidCiphertext,
    /// Caller supplied randomness is not a unit modulo N
    #[error("Invalid randomness, must be coprime to the modulus")]
    InvalidRandomness,
    /// Scratch space could not be allocated
    #[error("Out of memory")]
    OutOfMemory,
    /// An arithmetic invariant was violated or the entropy source failed
    #[error("Internal error: {0}")]
    InternalError(&'static str),
}

/// Paillier results
pub type PaillierResult<T> = Result<T, PaillierError>;
