//! DSA key types.
//!
//! Public and private keys are distinct product types that widen the
//! domain parameters, with explicit projections back down
//! ([`DsaPublicKey::params`], [`DsaPrivateKey::to_public_key`]); there is
//! no key-type hierarchy.

use num_traits::Zero;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::bigint::{BigUint, RandBigUint};
use crate::dsa::params::DsaParams;
use crate::errors::{Error, Result};

/// A DSA public key: domain parameters plus `y = g^x mod p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPublicKey {
    pub(crate) params: DsaParams,
    pub(crate) y: BigUint,
}

/// A DSA private key: the public key plus the secret exponent x.
#[derive(Clone)]
pub struct DsaPrivateKey {
    pub(crate) params: DsaParams,
    pub(crate) y: BigUint,
    pub(crate) x: BigUint,
}

impl PartialEq for DsaPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params && self.y == other.y && self.x == other.x
    }
}

impl Eq for DsaPrivateKey {}

impl Zeroize for DsaPrivateKey {
    fn zeroize(&mut self) {
        self.x.zeroize();
    }
}

impl Drop for DsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for DsaPrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DsaPrivateKey")
            .field("params", &self.params)
            .field("y", &self.y)
            .finish_non_exhaustive()
    }
}

impl DsaPublicKey {
    /// Builds a public key after the structural checks (`0 < y < p` on
    /// top of the parameter bounds).
    pub fn new(params: DsaParams, y: BigUint) -> Result<Self> {
        params.check_sanity()?;
        if y.is_zero() || y >= params.p {
            return Err(Error::InvalidKey);
        }
        Ok(DsaPublicKey { params, y })
    }

    pub(crate) fn from_components_unchecked(params: DsaParams, y: BigUint) -> Self {
        DsaPublicKey { params, y }
    }

    /// The domain parameters.
    pub fn params(&self) -> &DsaParams {
        &self.params
    }

    /// The public element y.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// The modulus size in bits.
    pub fn bits(&self) -> usize {
        self.params.bits()
    }

    /// The modulus size in bytes.
    pub fn size(&self) -> usize {
        self.params.p().byte_len()
    }

    /// Validates the domain parameters and the range of y.
    pub fn validate<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<()> {
        self.params.validate(rng)?;
        if self.y.is_zero() || self.y >= self.params.p {
            return Err(Error::InvalidKey);
        }
        Ok(())
    }
}

impl DsaPrivateKey {
    /// Builds a private key from parameters and the secret exponent,
    /// computing `y` when it is not supplied.
    pub fn from_components(
        params: DsaParams,
        y: Option<BigUint>,
        x: BigUint,
    ) -> Result<Self> {
        params.check_sanity()?;
        if x.is_zero() || x >= params.q {
            return Err(Error::InvalidKey);
        }
        let y = match y {
            Some(y) => y,
            None => compute_y(&params, &x),
        };
        if y.is_zero() || y >= params.p {
            return Err(Error::InvalidKey);
        }
        Ok(DsaPrivateKey { params, y, x })
    }

    pub(crate) fn from_components_unchecked(
        params: DsaParams,
        y: BigUint,
        x: BigUint,
    ) -> Self {
        DsaPrivateKey { params, y, x }
    }

    /// The domain parameters.
    pub fn params(&self) -> &DsaParams {
        &self.params
    }

    /// The public element y.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// The secret exponent x.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// The modulus size in bits.
    pub fn bits(&self) -> usize {
        self.params.bits()
    }

    /// The modulus size in bytes.
    pub fn size(&self) -> usize {
        self.params.p().byte_len()
    }

    /// A public key holding only the public fields.
    pub fn to_public_key(&self) -> DsaPublicKey {
        DsaPublicKey {
            params: self.params.clone(),
            y: self.y.clone(),
        }
    }

    /// Validates the public half, the range of x and that y matches
    /// `g^x mod p`.
    pub fn validate<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<()> {
        self.to_public_key().validate(rng)?;
        if self.x.is_zero() || self.x >= self.params.q {
            return Err(Error::InvalidKey);
        }
        if compute_y(&self.params, &self.x) != self.y {
            return Err(Error::InvalidKey);
        }
        Ok(())
    }
}

/// `y = g^x mod p` on the constant-time ladder; x is secret.
pub fn compute_y(params: &DsaParams, x: &BigUint) -> BigUint {
    params.g.modpow_consttime(x, &params.p)
}

/// Creates a private key for existing parameters: x uniform in
/// `[1, q - 1]`, y derived from it.
pub(crate) fn private_key_create<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    params: &DsaParams,
) -> Result<DsaPrivateKey> {
    params.check_sanity()?;
    let x = rng.gen_biguint_nonzero_below(&params.q);
    let y = compute_y(params, &x);
    Ok(DsaPrivateKey {
        params: params.clone(),
        y,
        x,
    })
}
