//! RSA key generation.

use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::bigint::BigUint;
use crate::errors::{Error, Result};
use crate::prime::RandPrime;
use crate::rsa::key::RsaPrivateKey;

/// The fixed public exponent F4.
pub(crate) const EXP: u64 = 65537;

/// Bit sizes `generate_key` accepts.
const ALLOWED_BITS: [usize; 5] = [512, 1024, 2048, 4096, 8192];

/// How far apart the primes must be: `|p - q| > 2^(bits/2 - 100)`, the
/// FIPS 186-4 B.3.3 distance bound that defeats Fermat factoring.
const PRIME_DISTANCE_MARGIN: usize = 100;

/// Generates a two-prime key of exactly `bit_size` bits with e = 65537.
pub(crate) fn generate_key<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
) -> Result<RsaPrivateKey> {
    if !ALLOWED_BITS.contains(&bit_size) {
        return Err(Error::InvalidParameter);
    }

    let e = BigUint::from(EXP);
    let one = BigUint::one();
    let min_distance = &one << (bit_size / 2 - PRIME_DISTANCE_MARGIN);

    loop {
        let mut p = gen_coprime_prime(rng, bit_size - bit_size / 2, &e);
        let mut q = gen_coprime_prime(rng, bit_size / 2, &e);
        if p < q {
            core::mem::swap(&mut p, &mut q);
        }

        // Close primes would make n vulnerable to Fermat factoring; equal
        // ones would make it a square.
        if &p - &q <= min_distance {
            continue;
        }

        let n = &p * &q;
        if n.bits() != bit_size {
            // Both primes have their top bit set, so this only trims the
            // roughly 1-in-4 products that land one bit short.
            continue;
        }

        let lambda = (&p - &one).lcm(&(&q - &one));
        let d = match e.mod_inverse(&lambda) {
            Some(d) => d,
            None => continue,
        };

        return RsaPrivateKey::from_components(n, e, d, p, q);
    }
}

/// A prime of `bits` bits whose predecessor is coprime to `e`.
fn gen_coprime_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
    e: &BigUint,
) -> BigUint {
    loop {
        let p = rng.gen_prime(bits);
        if (&p - BigUint::one()).gcd(e).is_one() {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::key::PublicKeyParts;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_odd_sizes() {
        let mut rng = ChaCha8Rng::from_seed([11; 32]);
        for bits in [0usize, 256, 768, 1000, 3072] {
            assert_eq!(
                generate_key(&mut rng, bits).unwrap_err(),
                Error::InvalidParameter
            );
        }
    }

    #[test]
    fn generates_exact_size() {
        let mut rng = ChaCha8Rng::from_seed([12; 32]);
        let key = generate_key(&mut rng, 512).unwrap();
        assert_eq!(key.bits(), 512);
        assert_eq!(key.e(), &BigUint::from(EXP));
        let (p, q) = key.primes();
        assert!(p > q);
        key.validate(&mut rng).unwrap();
    }
}
