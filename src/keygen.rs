use crate::{
    error::*, privatekey::totient, utils::*, PrivateKey, PublicKey, MIN_KEY_BITS,
    RECOMMENDED_KEY_BITS,
};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use unknown_order::BigNumber;

/// Residue of `p` mod 8
const P_RESIDUE: u8 = 3;
/// Residue of `q` mod 8
const Q_RESIDUE: u8 = 7;

/// Generate a new Paillier key pair using the OS entropy source.
///
/// See [`generate_key_pair_with_rng`] for the modulus length.
pub fn generate_key_pair(bits: usize) -> PaillierResult<(PublicKey, PrivateKey)> {
    generate_key_pair_with_rng(bits, &mut OsRng)
}

/// Generate a new Paillier key pair.
///
/// The modulus has `2 * (bits / 2)` bits, so an odd `bits` yields a modulus
/// one bit shorter than requested.
///
/// `p = 3 mod 8` and `q = 7 mod 8` are drawn with `bits / 2` bits each and
/// redrawn until they have the same length, differ, and `gcd(lambda, N) = 1`.
/// The congruences make N a Blum integer and give the fourth roots
/// that the Paillier-Blum modulus proof relies on.
///
/// There is no iteration cap. Callers that need bounded latency must
/// impose their own timeout.
pub fn generate_key_pair_with_rng<R: RngCore + CryptoRng>(
    bits: usize,
    rng: &mut R,
) -> PaillierResult<(PublicKey, PrivateKey)> {
    if bits < MIN_KEY_BITS {
        return Err(PaillierError::KeyTooShort);
    }
    if bits < RECOMMENDED_KEY_BITS {
        log::warn!(
            "Paillier key bit length {} is less than the recommended {} bits",
            bits,
            RECOMMENDED_KEY_BITS
        );
    }

    let prime_bits = bits / 2;
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        let p = random_prime_congruent(prime_bits, P_RESIDUE, rng)?;
        let q = random_prime_congruent(prime_bits, Q_RESIDUE, rng)?;

        if p.bit_length() != q.bit_length() || *p == *q {
            continue;
        }

        let n = &*p * &*q;
        let lambda = totient(&n, &p, &q);
        if lambda.gcd(&n) != BigNumber::one() {
            log::trace!("gcd(lambda, N) != 1, drawing new primes");
            continue;
        }

        // gcd(lambda, N) = 1 so mu exists, a missing inverse still only
        // means drawing again
        if let Some(sk) = PrivateKey::from_parts(&p, &q, n, &lambda) {
            log::debug!(
                "generated {} bit Paillier key after {} attempts",
                sk.pk.bits(),
                attempts
            );
            let pk = PublicKey::from(&sk);
            return Ok((pk, sk));
        }
    }
}
