use crate::{
    error::*, utils::*, Ciphertext, CiphertextWithNonce, Nonce, PrivateKey, MIN_KEY_BITS,
};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use unknown_order::BigNumber;

/// A Paillier public key
#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey {
    pub(crate) n: BigNumber,  // N = p * q, where p,q are primes
    pub(crate) nn: BigNumber, // N^2
}

impl From<&PrivateKey> for PublicKey {
    fn from(sk: &PrivateKey) -> PublicKey {
        sk.pk.clone()
    }
}

impl PublicKey {
    /// Constructs a public key from the Paillier modulus.
    ///
    /// `N^2` is always recomputed here. The modulus must be odd, composite
    /// and at least [`MIN_KEY_BITS`] long.
    pub fn from_modulus(n: BigNumber) -> PaillierResult<Self> {
        if n.bit_length() < MIN_KEY_BITS {
            return Err(PaillierError::KeyTooShort);
        }
        let two = BigNumber::from(2u64);
        if (&n % &two).is_zero() || n.is_prime() {
            return Err(PaillierError::InvalidKey);
        }
        Ok(Self::from_modulus_unchecked(n))
    }

    pub(crate) fn from_modulus_unchecked(n: BigNumber) -> Self {
        let nn = &n * &n;
        Self { n, nn }
    }

    /// l computes a residuosity class of N^2: (x - 1) / n
    /// where it is the quotient x - 1 divided by N not modular multiplication of x - 1 times
    /// the modular multiplication inverse of N. The function comes from Paillier's 99 paper.
    ///
    /// Callers only pass `c^lambda` for units `c`, so x = 1 mod N always holds
    /// and a violation is an internal error.
    pub(crate) fn l(&self, x: &BigNumber) -> PaillierResult<BigNumber> {
        let one = BigNumber::one();
        if x % &self.n != one {
            return Err(PaillierError::InternalError("L input is not 1 mod N"));
        }

        //(x - 1) / N
        Ok(&(x - &one) / &self.n)
    }

    /// The Paillier modulus
    pub fn n(&self) -> &BigNumber {
        &self.n
    }

    /// The Paillier modulus squared
    pub fn nn(&self) -> &BigNumber {
        &self.nn
    }

    /// The big-endian bytes of the modulus
    pub fn n_bytes(&self) -> Vec<u8> {
        self.n.to_bytes()
    }

    /// The size of the modulus in bits
    pub fn bits(&self) -> usize {
        self.n.bit_length()
    }

    /// Maximum byte length of a ciphertext under this key, `byte_length(N^2)`
    pub fn ciphertext_len(&self) -> usize {
        byte_length(&self.nn)
    }

    /// Maximum byte length of a plaintext under this key, `byte_length(N)`
    pub fn plaintext_len(&self) -> usize {
        byte_length(&self.n)
    }

    /// Encrypt `plaintext` which must be in [0, N)
    pub fn encrypt(&self, plaintext: &BigNumber) -> PaillierResult<Ciphertext> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }

    /// Encrypt `plaintext` drawing the nonce from `rng`
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        plaintext: &BigNumber,
        rng: &mut R,
    ) -> PaillierResult<Ciphertext> {
        let (ciphertext, _) = self.encrypt_with_nonce_from_rng(plaintext, rng)?;
        Ok(ciphertext)
    }

    /// Encrypt a big-endian byte encoded plaintext and return the ciphertext bytes
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> PaillierResult<Vec<u8>> {
        let m = self.plaintext_from_bytes(plaintext)?;
        Ok(self.encrypt(&m)?.to_bytes())
    }

    /// Encrypt a 64-bit integer
    pub fn encrypt_u64(&self, plaintext: u64) -> PaillierResult<Ciphertext> {
        self.encrypt(&BigNumber::from(plaintext))
    }

    /// Encrypt a big-endian byte encoded plaintext and keep the nonce
    /// for protocols that later reveal it
    pub fn encrypt_to_ciphertext(
        &self,
        plaintext: &[u8],
    ) -> PaillierResult<CiphertextWithNonce> {
        let m = self.plaintext_from_bytes(plaintext)?;
        let (ciphertext, nonce) = self.encrypt_with_nonce_from_rng(&m, &mut OsRng)?;
        Ok(CiphertextWithNonce { ciphertext, nonce })
    }

    /// Encrypt `plaintext` with a caller chosen nonce.
    ///
    /// The nonce must be in [1, N) and coprime to N. Unlike the other
    /// encryption functions there is no retry, a bad nonce is an error.
    pub fn encrypt_with_nonce(
        &self,
        plaintext: &BigNumber,
        nonce: &Nonce,
    ) -> PaillierResult<Ciphertext> {
        if !residue_in(plaintext, &self.n) {
            return Err(PaillierError::InvalidPlaintext);
        }
        if !mod_in(nonce, &self.n) || !is_coprime_public(nonce, &self.n) {
            return Err(PaillierError::InvalidRandomness);
        }
        Ok(self.encrypt_unchecked(plaintext, nonce))
    }

    pub(crate) fn encrypt_with_nonce_from_rng<R: RngCore + CryptoRng>(
        &self,
        plaintext: &BigNumber,
        rng: &mut R,
    ) -> PaillierResult<(Ciphertext, Nonce)> {
        if !residue_in(plaintext, &self.n) {
            return Err(PaillierError::InvalidPlaintext);
        }
        let nonce = self.random_nonce(rng)?;
        let ciphertext = self.encrypt_unchecked(plaintext, &nonce);
        Ok((ciphertext, nonce))
    }

    /// Draws r uniformly from [0, N) until gcd(r, N) = 1
    pub(crate) fn random_nonce<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> PaillierResult<Nonce> {
        loop {
            let r = random_below(&self.n, rng)?;
            if is_coprime_public(&r, &self.n) {
                return Ok(r);
            }
            log::trace!("nonce is not a unit mod N, drawing again");
        }
    }

    /// c = g^m r^N mod N^2 with g = N + 1
    pub(crate) fn encrypt_unchecked(&self, m: &BigNumber, r: &Nonce) -> Ciphertext {
        // g^m mod N^2 = (N + 1)^m mod N^2 = m N + 1 mod N^2
        // See Prop 11.26, Pg. 385 of Intro to Modern Cryptography
        let g_m = m
            .modmul(&self.n, &self.nn)
            .modadd(&BigNumber::one(), &self.nn);

        // r^N mod N^2
        let r_n = r.modpow(&self.n, &self.nn);

        g_m.modmul(&r_n, &self.nn)
    }

    /// Parses a plaintext, rejecting anything outside [0, N)
    pub(crate) fn plaintext_from_bytes(&self, plaintext: &[u8]) -> PaillierResult<BigNumber> {
        if plaintext.is_empty() {
            return Err(PaillierError::InvalidParameter);
        }
        if plaintext.len() > self.plaintext_len() {
            return Err(PaillierError::InvalidPlaintext);
        }
        let m = BigNumber::from_slice(plaintext);
        if !residue_in(&m, &self.n) {
            return Err(PaillierError::InvalidPlaintext);
        }
        Ok(m)
    }

    /// A ciphertext must be in [0, N^2) and a unit mod N
    pub(crate) fn validate_ciphertext(&self, c: &Ciphertext) -> PaillierResult<()> {
        if !residue_in(c, &self.nn) || !is_coprime_public(c, &self.n) {
            return Err(PaillierError::InvalidCiphertext);
        }
        Ok(())
    }
}
