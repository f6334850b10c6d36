use crate::error::*;
use rand::{CryptoRng, RngCore};
use unknown_order::BigNumber;
use zeroize::Zeroizing;

/// Checks `a` is in [1, n)
pub fn mod_in(a: &BigNumber, n: &BigNumber) -> bool {
    let lhs = &BigNumber::one() <= a;
    let rhs = a < n;
    lhs & rhs
}

/// Checks `a` is in [0, n)
///
/// The lower bound only matters on the signed `gmp`, `openssl` and `rust`
/// backends, the default `crypto` backend has no negative values.
pub fn residue_in(a: &BigNumber, n: &BigNumber) -> bool {
    let lhs = &BigNumber::zero() <= a;
    let rhs = a < n;
    lhs & rhs
}

/// gcd(a, b) == 1
///
/// WARNING: not constant time. Only call this when both operands are public,
/// i.e. the modulus together with a nonce or a ciphertext.
pub fn is_coprime_public(a: &BigNumber, b: &BigNumber) -> bool {
    a.gcd(b) == BigNumber::one()
}

/// Number of bytes needed for the big-endian magnitude of `a`
pub fn byte_length(a: &BigNumber) -> usize {
    (a.bit_length() + 7) / 8
}

/// Big-endian magnitude of `a` left padded with zeros to `len` bytes
pub fn to_padded_bytes(a: &BigNumber, len: usize) -> PaillierResult<Vec<u8>> {
    let bytes = a.to_bytes();
    let bytes = strip_leading_zeros(&bytes);
    if bytes.len() > len {
        return Err(PaillierError::InvalidParameter);
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Converts to a u64 if the value fits
pub fn to_u64(a: &BigNumber) -> Option<u64> {
    if a < &BigNumber::zero() {
        return None;
    }
    let bytes = a.to_bytes();
    let bytes = strip_leading_zeros(&bytes);
    if bytes.len() > 8 {
        return None;
    }
    Some(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Allocates a zeroed scratch buffer that is wiped when dropped
fn scratch(len: usize) -> PaillierResult<Zeroizing<Vec<u8>>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| PaillierError::OutOfMemory)?;
    buffer.resize(len, 0);
    Ok(Zeroizing::new(buffer))
}

fn fill<R: RngCore + CryptoRng>(rng: &mut R, buffer: &mut [u8]) -> PaillierResult<()> {
    rng.try_fill_bytes(buffer)
        .map_err(|_| PaillierError::InternalError("entropy source failure"))
}

/// Mask for the most significant byte of a `bits` long number
fn top_byte_mask(bits: usize) -> u8 {
    match bits % 8 {
        0 => 0xFF,
        r => (1u8 << r) - 1,
    }
}

fn set_bit(buffer: &mut [u8], bit: usize) {
    let index = buffer.len() - 1 - bit / 8;
    buffer[index] |= 1u8 << (bit % 8);
}

/// Draws a uniform value in [0, n) by rejection sampling
pub fn random_below<R: RngCore + CryptoRng>(
    n: &BigNumber,
    rng: &mut R,
) -> PaillierResult<BigNumber> {
    let bits = n.bit_length();
    if bits == 0 || n < &BigNumber::zero() {
        return Err(PaillierError::InvalidParameter);
    }
    let mut buffer = scratch((bits + 7) / 8)?;
    let mask = top_byte_mask(bits);
    loop {
        fill(rng, buffer.as_mut_slice())?;
        buffer[0] &= mask;
        let candidate = BigNumber::from_slice(buffer.as_slice());
        if &candidate < n {
            return Ok(candidate);
        }
        log::trace!("random value out of range, drawing again");
    }
}

/// Generates a prime of exactly `bits` bits with `prime = residue mod 8`.
///
/// The two most significant bits are set so the product of two such
/// primes has exactly `2 * bits` bits.
pub fn random_prime_congruent<R: RngCore + CryptoRng>(
    bits: usize,
    residue: u8,
    rng: &mut R,
) -> PaillierResult<Zeroizing<BigNumber>> {
    if bits < 8 || residue >= 8 || residue % 2 == 0 {
        return Err(PaillierError::InvalidParameter);
    }
    let mut buffer = scratch((bits + 7) / 8)?;
    let mask = top_byte_mask(bits);
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        fill(rng, buffer.as_mut_slice())?;
        buffer[0] &= mask;
        set_bit(buffer.as_mut_slice(), bits - 1);
        set_bit(buffer.as_mut_slice(), bits - 2);
        let last = buffer.len() - 1;
        buffer[last] = (buffer[last] & 0xF8) | residue;

        let candidate = Zeroizing::new(BigNumber::from_slice(buffer.as_slice()));
        if candidate.is_prime() {
            log::trace!(
                "found {} bit prime = {} mod 8 after {} candidates",
                bits,
                residue,
                attempts
            );
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn random_below_stays_in_range() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let n = BigNumber::from(1000u64);
        for _ in 0..200 {
            let r = random_below(&n, &mut rng).unwrap();
            assert!(residue_in(&r, &n));
        }
    }

    #[test]
    fn congruent_primes() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        let eight = BigNumber::from(8u64);
        for residue in [3u8, 7u8] {
            let p = random_prime_congruent(128, residue, &mut rng).unwrap();
            assert!(p.is_prime());
            assert_eq!(p.bit_length(), 128);
            assert_eq!(&*p % &eight, BigNumber::from(u64::from(residue)));
        }
    }

    #[test]
    fn congruent_primes_reject_bad_residue() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        assert_eq!(
            random_prime_congruent(128, 4, &mut rng).unwrap_err(),
            PaillierError::InvalidParameter
        );
    }

    #[test]
    fn u64_conversion() {
        assert_eq!(to_u64(&BigNumber::zero()), Some(0));
        assert_eq!(to_u64(&BigNumber::from(u64::MAX)), Some(u64::MAX));
        let too_big = BigNumber::from_slice([1u8, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(to_u64(&too_big), None);
    }

    #[test]
    fn padding() {
        let v = BigNumber::from(0x0102u64);
        assert_eq!(to_padded_bytes(&v, 4).unwrap(), vec![0, 0, 1, 2]);
        assert!(to_padded_bytes(&v, 1).is_err());
    }
}
