//! Fixed byte layouts for keys and ciphertexts.
//!
//! Public key:  `len: u32 (native endian) || N` with `len = byte_length(N)`
//! Private key: `len: u32 (native endian) || p || q` with `len = byte_length(p)`
//! Ciphertext:  big-endian magnitude, at most `byte_length(N^2)` bytes
//!
//! Decoding never trusts derived values. `N^2`, lambda and mu are always
//! recomputed and every key invariant is checked again.

use crate::{
    error::*, utils::*, Ciphertext, CiphertextWithNonce, PrivateKey, PublicKey, MIN_KEY_BITS,
};
use core::mem::size_of;
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};
use unknown_order::BigNumber;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const LEN_PREFIX: usize = size_of::<u32>();

/// Result of writing into a caller supplied buffer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// This many bytes were written to the start of the buffer
    Written(usize),
    /// Nothing was written, the buffer must hold at least this many bytes
    Required(usize),
}

fn write_into(bytes: &[u8], out: &mut [u8]) -> WriteOutcome {
    if out.len() < bytes.len() {
        return WriteOutcome::Required(bytes.len());
    }
    out[..bytes.len()].copy_from_slice(bytes);
    WriteOutcome::Written(bytes.len())
}

fn encode_len(len: usize) -> PaillierResult<[u8; LEN_PREFIX]> {
    let len = u32::try_from(len).map_err(|_| PaillierError::InvalidParameter)?;
    Ok(len.to_ne_bytes())
}

/// Splits off the length prefix and returns it together with the payload
fn decode_len(data: &[u8]) -> PaillierResult<(usize, &[u8])> {
    if data.len() < LEN_PREFIX + MIN_KEY_BITS / 8 {
        return Err(PaillierError::KeyTooShort);
    }
    let (prefix, payload) = data.split_at(LEN_PREFIX);
    let prefix =
        <[u8; LEN_PREFIX]>::try_from(prefix).map_err(|_| PaillierError::InvalidKey)?;
    let len =
        usize::try_from(u32::from_ne_bytes(prefix)).map_err(|_| PaillierError::InvalidKey)?;
    Ok((len, payload))
}

impl PublicKey {
    /// Get this key's byte representation
    pub fn to_bytes(&self) -> PaillierResult<Vec<u8>> {
        let n = to_padded_bytes(&self.n, byte_length(&self.n))?;
        let mut out = Vec::with_capacity(LEN_PREFIX + n.len());
        out.extend_from_slice(&encode_len(n.len())?);
        out.extend_from_slice(&n);
        Ok(out)
    }

    /// Write this key's byte representation into `out`
    pub fn serialize_into(&self, out: &mut [u8]) -> PaillierResult<WriteOutcome> {
        Ok(write_into(&self.to_bytes()?, out))
    }

    /// Convert a byte representation to a public key.
    ///
    /// The length prefix must match the payload and the modulus must
    /// satisfy [`PublicKey::from_modulus`].
    pub fn from_bytes<B: AsRef<[u8]>>(data: B) -> PaillierResult<Self> {
        let (len, payload) = decode_len(data.as_ref())?;
        if len != payload.len() {
            log::debug!(
                "rejecting public key, prefix {} does not match {} payload bytes",
                len,
                payload.len()
            );
            return Err(PaillierError::InvalidKey);
        }
        Self::from_modulus(BigNumber::from_slice(payload)).map_err(|e| {
            log::debug!("rejecting public key: {}", e);
            e
        })
    }

    /// Parse a big-endian ciphertext for this key
    pub fn ciphertext_from_bytes(&self, data: &[u8]) -> PaillierResult<Ciphertext> {
        if data.is_empty() {
            return Err(PaillierError::InvalidParameter);
        }
        if data.len() > self.ciphertext_len() {
            return Err(PaillierError::InvalidCiphertext);
        }
        let c = BigNumber::from_slice(data);
        if !residue_in(&c, &self.nn) {
            return Err(PaillierError::InvalidCiphertext);
        }
        Ok(c)
    }

    /// Encrypt a big-endian plaintext directly into `out`.
    ///
    /// When `out` is shorter than [`PublicKey::ciphertext_len`] nothing is
    /// encrypted and the required length is returned instead.
    pub fn encrypt_into(
        &self,
        plaintext: &[u8],
        out: &mut [u8],
    ) -> PaillierResult<WriteOutcome> {
        let m = self.plaintext_from_bytes(plaintext)?;
        let required = self.ciphertext_len();
        if out.len() < required {
            return Ok(WriteOutcome::Required(required));
        }
        let c = self.encrypt(&m)?;
        Ok(write_into(&c.to_bytes(), out))
    }
}

impl PrivateKey {
    /// Get this key's byte representation, only `p` and `q` are stored
    pub fn to_bytes(&self) -> PaillierResult<Vec<u8>> {
        let len = byte_length(&self.p).max(byte_length(&self.q));
        let p = Zeroizing::new(to_padded_bytes(&self.p, len)?);
        let q = Zeroizing::new(to_padded_bytes(&self.q, len)?);
        let mut out = Vec::with_capacity(LEN_PREFIX + 2 * len);
        out.extend_from_slice(&encode_len(len)?);
        out.extend_from_slice(&p);
        out.extend_from_slice(&q);
        Ok(out)
    }

    /// Write this key's byte representation into `out`
    pub fn serialize_into(&self, out: &mut [u8]) -> PaillierResult<WriteOutcome> {
        let bytes = Zeroizing::new(self.to_bytes()?);
        Ok(write_into(&bytes, out))
    }

    /// Convert a byte representation to a private key.
    ///
    /// N, N^2, lambda and mu are recomputed from the primes, which must
    /// pass [`PrivateKey::from_primes`].
    pub fn from_bytes<B: AsRef<[u8]>>(data: B) -> PaillierResult<Self> {
        let (len, payload) = decode_len(data.as_ref())?;
        let expected = len.checked_mul(2).ok_or(PaillierError::InvalidKey)?;
        if expected != payload.len() {
            log::debug!(
                "rejecting private key, prefix {} does not match {} payload bytes",
                len,
                payload.len()
            );
            return Err(PaillierError::InvalidKey);
        }
        let (p, q) = payload.split_at(len);
        let p = Zeroizing::new(BigNumber::from_slice(p));
        let q = Zeroizing::new(BigNumber::from_slice(q));
        PrivateKey::from_primes(&p, &q).map_err(|e| {
            log::debug!("rejecting private key: {}", e);
            e
        })
    }
}

impl CiphertextWithNonce {
    /// Write the ciphertext bytes into `out`
    pub fn write_to(&self, out: &mut [u8]) -> WriteOutcome {
        write_into(&self.to_bytes(), out)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.n.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = BigNumber::deserialize(deserializer)?;
        PublicKey::from_modulus(n).map_err(DeError::custom)
    }
}

/// The minimal representation of a private key
#[derive(Serialize)]
struct PrimesRef<'a> {
    p: &'a BigNumber,
    q: &'a BigNumber,
}

#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct Primes {
    p: BigNumber,
    q: BigNumber,
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PrimesRef {
            p: &self.p,
            q: &self.q,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let primes = Primes::deserialize(deserializer)?;
        PrivateKey::from_primes(&primes.p, &primes.q).map_err(DeError::custom)
    }
}
