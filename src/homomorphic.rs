//! Operations on ciphertexts that only need the public key.
//!
//! Every ciphertext operand is checked to be in [0, N^2) and coprime to N
//! and every scalar to be in [0, N) before any exponentiation happens.
//! Operands are never assumed to come from this crate's encryption.

use crate::{error::*, utils::*, Ciphertext, PublicKey};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use unknown_order::BigNumber;

impl PublicKey {
    /// Combines two Paillier ciphertexts
    /// commonly denoted in text as c1 \bigoplus c2
    ///
    /// D(add(E(m1), E(m2))) = m1 + m2 mod N
    pub fn add(&self, c1: &Ciphertext, c2: &Ciphertext) -> PaillierResult<Ciphertext> {
        self.validate_ciphertext(c1)?;
        self.validate_ciphertext(c2)?;

        Ok(c1.modmul(c2, &self.nn))
    }

    /// Adds a plaintext constant, D(add_scalar(E(m), k)) = m + k mod N
    pub fn add_scalar(&self, c: &Ciphertext, k: &BigNumber) -> PaillierResult<Ciphertext> {
        self.add_scalar_with_rng(c, k, &mut OsRng)
    }

    /// Same as [`PublicKey::add_scalar`] with the nonce for E(k) drawn from `rng`
    pub fn add_scalar_with_rng<R: RngCore + CryptoRng>(
        &self,
        c: &Ciphertext,
        k: &BigNumber,
        rng: &mut R,
    ) -> PaillierResult<Ciphertext> {
        self.validate_ciphertext(c)?;
        self.validate_scalar(k)?;

        let ck = self.encrypt_with_rng(k, rng)?;
        Ok(c.modmul(&ck, &self.nn))
    }

    /// Adds a 64-bit constant
    pub fn add_u64(&self, c: &Ciphertext, k: u64) -> PaillierResult<Ciphertext> {
        self.add_scalar(c, &BigNumber::from(k))
    }

    /// Subtracts two Paillier ciphertexts,
    /// D(sub(E(m1), E(m2))) = m1 - m2 mod N
    pub fn sub(&self, c1: &Ciphertext, c2: &Ciphertext) -> PaillierResult<Ciphertext> {
        self.validate_ciphertext(c1)?;
        self.validate_ciphertext(c2)?;

        let c2_inv = self.invert_ciphertext(c2)?;
        Ok(c1.modmul(&c2_inv, &self.nn))
    }

    /// Subtracts a plaintext constant, D(sub_scalar(E(m), k)) = m - k mod N
    pub fn sub_scalar(&self, c: &Ciphertext, k: &BigNumber) -> PaillierResult<Ciphertext> {
        self.sub_scalar_with_rng(c, k, &mut OsRng)
    }

    /// Same as [`PublicKey::sub_scalar`] with the nonce for E(k) drawn from `rng`
    pub fn sub_scalar_with_rng<R: RngCore + CryptoRng>(
        &self,
        c: &Ciphertext,
        k: &BigNumber,
        rng: &mut R,
    ) -> PaillierResult<Ciphertext> {
        self.validate_ciphertext(c)?;
        self.validate_scalar(k)?;

        let ck = self.encrypt_with_rng(k, rng)?;
        let ck_inv = self.invert_ciphertext(&ck)?;
        Ok(c.modmul(&ck_inv, &self.nn))
    }

    /// Subtracts a 64-bit constant
    pub fn sub_u64(&self, c: &Ciphertext, k: u64) -> PaillierResult<Ciphertext> {
        self.sub_scalar(c, &BigNumber::from(k))
    }

    /// Equivalent to multiplying the Paillier plaintext by `k`,
    /// D(mul_scalar(E(m), k)) = m * k mod N
    pub fn mul_scalar(&self, c: &Ciphertext, k: &BigNumber) -> PaillierResult<Ciphertext> {
        self.validate_ciphertext(c)?;
        self.validate_scalar(k)?;

        Ok(c.modpow(k, &self.nn))
    }

    /// Multiplies by a 64-bit constant
    pub fn mul_u64(&self, c: &Ciphertext, k: u64) -> PaillierResult<Ciphertext> {
        self.mul_scalar(c, &BigNumber::from(k))
    }

    fn validate_scalar(&self, k: &BigNumber) -> PaillierResult<()> {
        if !residue_in(k, &self.n) {
            return Err(PaillierError::InvalidPlaintext);
        }
        Ok(())
    }

    /// c^-1 mod N^2, which exists for every unit mod N
    fn invert_ciphertext(&self, c: &Ciphertext) -> PaillierResult<Ciphertext> {
        c.invert(&self.nn)
            .ok_or(PaillierError::InternalError("ciphertext has no inverse mod N^2"))
    }
}
