//! RSA key types.

use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::bigint::BigUint;
use crate::errors::{Error, Result};
use crate::prime::{probably_prime, MILLER_RABIN_ROUNDS};

/// Smallest modulus accepted anywhere.
pub(crate) const MIN_MODULUS_BITS: usize = 512;
/// Largest modulus accepted on import.
pub(crate) const MAX_MODULUS_BITS: usize = 16384;
/// Public exponents must fit below 2^33.
const MAX_PUB_EXPONENT_BITS: usize = 33;

/// Read access to the public half of a key, implemented by both key types
/// so private keys work wherever a public key is expected.
pub trait PublicKeyParts {
    /// The modulus.
    fn n(&self) -> &BigUint;
    /// The public exponent.
    fn e(&self) -> &BigUint;

    /// Modulus size in bytes; raw signatures have exactly this length.
    fn size(&self) -> usize {
        self.n().byte_len()
    }

    /// Modulus size in bits.
    fn bits(&self) -> usize {
        self.n().bits()
    }
}

/// The public part of an RSA key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}

/// A whole RSA key, private and public parts.
#[derive(Clone)]
pub struct RsaPrivateKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
    pub(crate) d: BigUint,
    /// First prime factor; the larger of the two.
    pub(crate) p: BigUint,
    /// Second prime factor.
    pub(crate) q: BigUint,
    /// CRT exponents and coefficient.
    pub(crate) dp: BigUint,
    pub(crate) dq: BigUint,
    pub(crate) qinv: BigUint,
}

impl PartialEq for RsaPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
            && self.e == other.e
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
    }
}

impl Eq for RsaPrivateKey {}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(key: &RsaPrivateKey) -> Self {
        RsaPublicKey {
            n: key.n.clone(),
            e: key.e.clone(),
        }
    }
}

impl RsaPublicKey {
    /// Creates a public key from its components and checks the public
    /// bounds.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let key = RsaPublicKey { n, e };
        check_public(&key)?;
        Ok(key)
    }

    pub(crate) fn from_components_unchecked(n: BigUint, e: BigUint) -> Self {
        RsaPublicKey { n, e }
    }
}

impl RsaPrivateKey {
    /// Assembles a private key from `(n, e, d, p, q)`, computing the CRT
    /// parameters.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<RsaPrivateKey> {
        let one = BigUint::one();
        if p <= one || q <= one {
            return Err(Error::InvalidKey);
        }
        let dp = &d % (&p - &one);
        let dq = &d % (&q - &one);
        let qinv = q.mod_inverse(&p).ok_or(Error::InvalidKey)?;
        Ok(RsaPrivateKey {
            n,
            e,
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        })
    }

    /// Assembles a private key from the full PKCS#1 field set without
    /// recomputing anything; used by the decoders.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
        dp: BigUint,
        dq: BigUint,
        qinv: BigUint,
    ) -> RsaPrivateKey {
        RsaPrivateKey {
            n,
            e,
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        }
    }

    /// The private exponent.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// The prime factors `(p, q)`.
    pub fn primes(&self) -> (&BigUint, &BigUint) {
        (&self.p, &self.q)
    }

    /// A public key holding only the public fields.
    pub fn to_public_key(&self) -> RsaPublicKey {
        RsaPublicKey::from(self)
    }

    /// Full private-key validation: the public checks, primality of both
    /// factors, the modulus product, the CRT parameters and the key
    /// equation `e·d ≡ 1 (mod lcm(p-1, q-1))`.
    pub fn validate<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<()> {
        check_public(self)?;

        let one = BigUint::one();
        if !probably_prime(rng, &self.p, MILLER_RABIN_ROUNDS)
            || !probably_prime(rng, &self.q, MILLER_RABIN_ROUNDS)
        {
            return Err(Error::InvalidKey);
        }
        if &self.p * &self.q != self.n {
            return Err(Error::InvalidKey);
        }

        let pm1 = &self.p - &one;
        let qm1 = &self.q - &one;
        if self.dp != &self.d % &pm1 || self.dq != &self.d % &qm1 {
            return Err(Error::InvalidKey);
        }
        if (&self.qinv * &self.q) % &self.p != one {
            return Err(Error::InvalidKey);
        }

        let lambda = pm1.lcm(&qm1);
        if (&self.e * &self.d) % &lambda != BigUint::one() {
            return Err(Error::InvalidKey);
        }
        Ok(())
    }
}

/// The public well-formedness checks: an odd modulus of acceptable size
/// and an odd exponent in `[3, 2^33)` below the modulus.
pub fn check_public(key: &impl PublicKeyParts) -> Result<()> {
    let n = key.n();
    let e = key.e();

    if n.bits() < MIN_MODULUS_BITS || n.bits() > MAX_MODULUS_BITS {
        return Err(Error::InvalidKey);
    }
    if !n.is_odd() {
        return Err(Error::InvalidKey);
    }
    if e.is_even() || e < &BigUint::from(3u64) || e >= n {
        return Err(Error::InvalidKey);
    }
    if e.bits() > MAX_PUB_EXPONENT_BITS {
        return Err(Error::InvalidKey);
    }
    Ok(())
}
