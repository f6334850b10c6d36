use crate::{error::*, utils::*, Ciphertext, PublicKey, MIN_KEY_BITS};
use core::fmt::{self, Debug, Formatter};
use unknown_order::BigNumber;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A Paillier private key
///
/// Everything except the public modulus is wiped when the key is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) pk: PublicKey,
    /// The prime `p = 3 mod 8`
    pub(crate) p: BigNumber,
    /// The prime `q = 7 mod 8`
    pub(crate) q: BigNumber,
    /// (P - 1)(Q - 1) computed as N - P - Q + 1
    pub(crate) lambda: BigNumber,
    /// lambda^-1 mod N
    pub(crate) mu: BigNumber,
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("n", &self.pk.n)
            .finish_non_exhaustive()
    }
}

impl PrivateKey {
    /// Create a new key from two primes.
    ///
    /// Checks every structural invariant: `p != q`, both prime with the same
    /// bit length, `p = 3 mod 8`, `q = 7 mod 8`, `gcd(lambda, N) = 1` and
    /// the modulus is at least [`MIN_KEY_BITS`] long.
    pub fn from_primes(p: &BigNumber, q: &BigNumber) -> PaillierResult<Self> {
        // Paillier doesn't work if p == q
        if p == q || p.bit_length() != q.bit_length() {
            return Err(PaillierError::InvalidKey);
        }
        if p.bit_length() + q.bit_length() < MIN_KEY_BITS {
            return Err(PaillierError::KeyTooShort);
        }
        let eight = BigNumber::from(8u64);
        if p % &eight != BigNumber::from(3u64) || q % &eight != BigNumber::from(7u64) {
            return Err(PaillierError::InvalidKey);
        }
        if !p.is_prime() || !q.is_prime() {
            return Err(PaillierError::InvalidKey);
        }
        let sk = Self::with_primes_unchecked(p, q).ok_or(PaillierError::InvalidKey)?;
        if sk.pk.bits() < MIN_KEY_BITS {
            return Err(PaillierError::KeyTooShort);
        }
        Ok(sk)
    }

    /// Derives N, N^2, lambda and mu from `p` and `q`.
    ///
    /// Returns `None` when lambda has no inverse mod N.
    pub(crate) fn with_primes_unchecked(p: &BigNumber, q: &BigNumber) -> Option<Self> {
        let n = p * q;
        let lambda = totient(&n, p, q);
        Self::from_parts(p, q, n, &lambda)
    }

    pub(crate) fn from_parts(
        p: &BigNumber,
        q: &BigNumber,
        n: BigNumber,
        lambda: &BigNumber,
    ) -> Option<Self> {
        let mu = lambda.invert(&n)?;
        Some(PrivateKey {
            pk: PublicKey::from_modulus_unchecked(n),
            p: p.clone(),
            q: q.clone(),
            lambda: lambda.clone(),
            mu,
        })
    }

    /// Reverse ciphertext to plaintext.
    ///
    /// The ciphertext must be in [0, N^2) and coprime to N.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> PaillierResult<BigNumber> {
        self.pk.validate_ciphertext(ciphertext)?;

        // a = c^\lambda mod n^2
        let a = Zeroizing::new(ciphertext.modpow(&self.lambda, &self.pk.nn));
        // ell = L(a, N)
        let l = Zeroizing::new(self.pk.l(&a)?);
        // m = lu = L(a)*u = L(c^\lamba*)u mod n
        Ok(l.modmul(&self.mu, &self.pk.n))
    }

    /// Decrypt a big-endian ciphertext and return the big-endian plaintext.
    ///
    /// The output is never empty, a zero plaintext is the single byte `0`.
    pub fn decrypt_bytes(&self, ciphertext: &[u8]) -> PaillierResult<Vec<u8>> {
        let c = self.pk.ciphertext_from_bytes(ciphertext)?;
        let m = Zeroizing::new(self.decrypt(&c)?);
        to_padded_bytes(&m, byte_length(&m).max(1))
    }

    /// Decrypt a ciphertext whose plaintext fits in 64 bits
    pub fn decrypt_u64(&self, ciphertext: &Ciphertext) -> PaillierResult<u64> {
        let m = Zeroizing::new(self.decrypt(ciphertext)?);
        to_u64(&m).ok_or(PaillierError::InvalidPlaintext)
    }

    /// The public half of this key
    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// The Paillier modulus
    pub fn n(&self) -> &BigNumber {
        self.pk.n()
    }

    /// The prime `p`
    pub fn p(&self) -> &BigNumber {
        &self.p
    }

    /// The prime `q`
    pub fn q(&self) -> &BigNumber {
        &self.q
    }

    /// The Paillier `lambda`
    pub fn lambda(&self) -> &BigNumber {
        &self.lambda
    }

    /// The Paillier `mu`
    pub fn mu(&self) -> &BigNumber {
        &self.mu
    }
}

/// (p - 1)(q - 1) computed as N - p - q + 1
pub(crate) fn totient(n: &BigNumber, p: &BigNumber, q: &BigNumber) -> Zeroizing<BigNumber> {
    let n_minus_p = Zeroizing::new(n - p);
    let n_minus_pq = Zeroizing::new(&*n_minus_p - q);
    Zeroizing::new(&*n_minus_pq + &BigNumber::one())
}
