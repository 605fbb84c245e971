//! DSA parameter generation, key generation and signatures.
//!
//! The `msg` handed to [`sign`] and [`verify`] is the caller's already
//! computed digest, truncated to the width of q; this module never hashes.
//! As with RSA, every operation has a raw-DER variant and the `verify`
//! family answers `false` rather than erroring on untrusted input.

mod encoding;
mod key;
mod params;
mod sign;

pub use self::key::{compute_y, DsaPrivateKey, DsaPublicKey};
pub use self::params::DsaParams;
pub use self::sign::Signature;

use alloc::vec::Vec;

use rand_core::CryptoRngCore;

use crate::errors::Result;

/// Generates domain parameters for a modulus of `bits` bits,
/// `1024 <= bits <= 3072`. The subgroup order has 160 bits below L = 2048
/// and 256 bits from there up.
pub fn params_generate<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
) -> Result<DsaParams> {
    params::params_generate(rng, bits)
}

/// Validates domain parameters, including primality of p and q.
pub fn params_verify<R: CryptoRngCore + ?Sized>(rng: &mut R, params: &DsaParams) -> bool {
    params.validate(rng).is_ok()
}

/// Creates a private key for existing parameters.
pub fn private_key_create<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    params: &DsaParams,
) -> Result<DsaPrivateKey> {
    key::private_key_create(rng, params)
}

/// Fresh parameters and a private key for them in one step.
pub fn private_key_generate<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
) -> Result<DsaPrivateKey> {
    let params = params_generate(rng, bits)?;
    private_key_create(rng, &params)
}

/// The public key belonging to `key`.
pub fn public_key_create(key: &DsaPrivateKey) -> DsaPublicKey {
    key.to_public_key()
}

/// Validates a public key (parameters plus the range of y).
pub fn public_key_verify<R: CryptoRngCore + ?Sized>(rng: &mut R, key: &DsaPublicKey) -> bool {
    key.validate(rng).is_ok()
}

/// Validates a private key, including `y = g^x mod p`.
pub fn private_key_verify<R: CryptoRngCore + ?Sized>(rng: &mut R, key: &DsaPrivateKey) -> bool {
    key.validate(rng).is_ok()
}

/// Signs a digest of 1 to 64 bytes; see the module docs for the message
/// convention.
pub fn sign<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    msg: &[u8],
    key: &DsaPrivateKey,
) -> Result<Signature> {
    sign::sign(rng, msg, key)
}

/// Verifies a signature; any malformed or out-of-range input answers
/// `false`.
pub fn verify(msg: &[u8], sig: &Signature, key: &DsaPublicKey) -> bool {
    sign::verify_inner(msg, sig, key).is_ok()
}

/// [`params_verify`] over `Dss-Parms` DER.
pub fn params_verify_der<R: CryptoRngCore + ?Sized>(rng: &mut R, params_der: &[u8]) -> bool {
    match DsaParams::from_der(params_der) {
        Ok(params) => params_verify(rng, &params),
        Err(_) => false,
    }
}

/// [`private_key_create`] over DER: emits `DSAPrivateKey` DER for fresh
/// key material under the given `Dss-Parms` DER.
pub fn private_key_create_der<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    params_der: &[u8],
) -> Result<Vec<u8>> {
    let params = DsaParams::from_der(params_der)?;
    Ok(private_key_create(rng, &params)?.to_der())
}

/// [`public_key_create`] over DER: extracts `DSAPublicKey` DER from
/// `DSAPrivateKey` DER.
pub fn public_key_create_der(private_der: &[u8]) -> Result<Vec<u8>> {
    let key = DsaPrivateKey::from_der(private_der)?;
    Ok(key.to_public_key().to_der())
}

/// [`public_key_verify`] over `DSAPublicKey` DER.
pub fn public_key_verify_der<R: CryptoRngCore + ?Sized>(rng: &mut R, public_der: &[u8]) -> bool {
    match DsaPublicKey::from_der(public_der) {
        Ok(key) => public_key_verify(rng, &key),
        Err(_) => false,
    }
}

/// [`private_key_verify`] over `DSAPrivateKey` DER.
pub fn private_key_verify_der<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    private_der: &[u8],
) -> bool {
    match DsaPrivateKey::from_der(private_der) {
        Ok(key) => private_key_verify(rng, &key),
        Err(_) => false,
    }
}

/// [`sign`] over `DSAPrivateKey` DER.
pub fn sign_der<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    msg: &[u8],
    private_der: &[u8],
) -> Result<Signature> {
    let key = DsaPrivateKey::from_der(private_der)?;
    sign(rng, msg, &key)
}

/// [`verify`] over `DSAPublicKey` DER.
pub fn verify_der(msg: &[u8], sig: &Signature, public_der: &[u8]) -> bool {
    match DsaPublicKey::from_der(public_der) {
        Ok(key) => verify(msg, sig, &key),
        Err(_) => false,
    }
}
