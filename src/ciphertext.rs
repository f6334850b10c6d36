use crate::{Ciphertext, Nonce};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A ciphertext together with the nonce used to produce it.
///
/// Some proofs of correct encryption need `r` revealed to the verifier,
/// everyone else should use the plain [`Ciphertext`]. The nonce is wiped
/// when this value is dropped.
#[derive(Clone, Debug, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct CiphertextWithNonce {
    #[zeroize(skip)]
    pub(crate) ciphertext: Ciphertext,
    pub(crate) nonce: Nonce,
}

impl CiphertextWithNonce {
    /// The ciphertext value
    pub fn ciphertext(&self) -> &Ciphertext {
        &self.ciphertext
    }

    /// The nonce `r` used during encryption
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Big-endian bytes of the ciphertext
    pub fn to_bytes(&self) -> Vec<u8> {
        self.ciphertext.to_bytes()
    }
}
