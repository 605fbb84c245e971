//! DSA domain parameters.

use num_traits::{One, Zero};
use rand_core::CryptoRngCore;

use crate::bigint::{BigUint, RandBigUint};
use crate::errors::{Error, Result};
use crate::prime::{probably_prime, MILLER_RABIN_ROUNDS};

/// Smallest permitted prime modulus size L.
pub(crate) const MIN_P_BITS: usize = 1024;
/// Largest permitted prime modulus size L.
pub(crate) const MAX_P_BITS: usize = 3072;

/// The domain parameters `(p, q, g)`: a prime modulus p of L bits, a prime
/// group order q of N bits with `q | p - 1`, and a generator g of the
/// order-q subgroup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaParams {
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,
    pub(crate) g: BigUint,
}

impl DsaParams {
    /// Builds parameters from components after the structural bound
    /// checks (L in [1024, 3072], N in {160, 224, 256}, `0 < g < p`).
    /// Algebraic validity is the business of [`DsaParams::validate`].
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        let params = DsaParams { p, q, g };
        params.check_sanity()?;
        Ok(params)
    }

    pub(crate) fn from_components_unchecked(p: BigUint, q: BigUint, g: BigUint) -> Self {
        DsaParams { p, q, g }
    }

    /// The prime modulus.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The subgroup order.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// The subgroup generator.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// L, the modulus size in bits.
    pub fn bits(&self) -> usize {
        self.p.bits()
    }

    /// The byte width of q, which is also the width of each signature
    /// half.
    pub fn q_size(&self) -> usize {
        self.q.byte_len()
    }

    pub(crate) fn check_sanity(&self) -> Result<()> {
        let pb = self.p.bits();
        let qb = self.q.bits();
        let gb = self.g.bits();

        if !(MIN_P_BITS..=MAX_P_BITS).contains(&pb) {
            return Err(Error::InvalidKey);
        }
        if qb != 160 && qb != 224 && qb != 256 {
            return Err(Error::InvalidKey);
        }
        if gb == 0 || self.g >= self.p || self.g.is_one() {
            return Err(Error::InvalidKey);
        }
        Ok(())
    }

    /// Full parameter validation: the bound checks, primality of p and q,
    /// `q | p - 1`, that g generates the order-q subgroup
    /// (`g^q ≡ 1 (mod p)` with `g ≠ 1`), and that the cofactor power
    /// `g^((p-1)/q) mod p` is nontrivial. The cofactor check rejects
    /// domains where `q² | p - 1`, which every order-q generator would
    /// otherwise pass.
    pub fn validate<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<()> {
        self.check_sanity()?;

        let pm1 = &self.p - BigUint::one();
        if !(&pm1 % &self.q).is_zero() {
            return Err(Error::InvalidKey);
        }
        if !self.g.modpow(&self.q, &self.p).is_one() {
            return Err(Error::InvalidKey);
        }
        let cofactor = &pm1 / &self.q;
        if self.g.modpow(&cofactor, &self.p).is_one() {
            return Err(Error::InvalidKey);
        }
        if !probably_prime(rng, &self.q, MILLER_RABIN_ROUNDS)
            || !probably_prime(rng, &self.p, MILLER_RABIN_ROUNDS)
        {
            return Err(Error::InvalidKey);
        }
        Ok(())
    }
}

/// Generates domain parameters for a modulus of `bits` bits.
///
/// The subgroup order gets 160 bits below L = 2048 and 256 bits from
/// there up. The search follows the FIPS 186-4 shape: a fresh prime q,
/// then up to 4L candidates for p adjusted so that `q | p - 1`, starting
/// over with a new q when the budget runs out; the generator search walks
/// h = 2, 3, ... until `h^((p-1)/q)` is nontrivial.
pub(crate) fn params_generate<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
) -> Result<DsaParams> {
    if !(MIN_P_BITS..=MAX_P_BITS).contains(&bits) {
        return Err(Error::InvalidParameter);
    }
    let n = if bits < 2048 { 160 } else { 256 };
    let one = BigUint::one();

    let (p, q) = 'search: loop {
        let q = loop {
            let mut candidate = rng.gen_biguint(n);
            candidate.set_bit(n - 1, true);
            candidate.set_bit(0, true);
            if probably_prime(rng, &candidate, MILLER_RABIN_ROUNDS) {
                break candidate;
            }
        };

        for _ in 0..4 * bits {
            let mut candidate = rng.gen_biguint(bits);
            candidate.set_bit(bits - 1, true);
            candidate.set_bit(0, true);

            // Shift the candidate down to the nearest value that is
            // congruent to 1 mod q.
            let rem = &candidate % &q;
            let p = if rem.is_zero() {
                candidate + &one
            } else {
                candidate - (rem - &one)
            };
            if p.bits() < bits {
                continue;
            }
            if probably_prime(rng, &p, MILLER_RABIN_ROUNDS) {
                break 'search (p, q);
            }
        }
        // Candidate budget exhausted; try a different q.
    };

    let pm1 = &p - &one;
    let exp = &pm1 / &q;
    let mut h = BigUint::from(2u64);
    let g = loop {
        let g = h.modpow(&exp, &p);
        if !g.is_one() {
            break g;
        }
        h += &one;
    };

    Ok(DsaParams { p, q, g })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_out_of_range_sizes() {
        let mut rng = ChaCha8Rng::from_seed([31; 32]);
        for bits in [0usize, 512, 1023, 3073, 4096] {
            assert_eq!(
                params_generate(&mut rng, bits).unwrap_err(),
                Error::InvalidParameter
            );
        }
    }

    #[test]
    fn sanity_bounds() {
        let p = BigUint::one() << 1023usize;
        let q = BigUint::one() << 159usize;
        // g = 0 is rejected outright.
        assert!(DsaParams::new(p.clone(), q.clone(), BigUint::zero()).is_err());
        // g = 1 is the trivial subgroup.
        assert!(DsaParams::new(p.clone(), q.clone(), BigUint::one()).is_err());
        // g >= p is out of range.
        assert!(DsaParams::new(p.clone(), q, p.clone()).is_err());
    }
}
