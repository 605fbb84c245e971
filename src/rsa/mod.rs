//! RSA key generation, validation and PKCS#1 v1.5 signatures.
//!
//! Every operation exists in two forms: one over key objects and one over
//! raw PKCS#1 DER bytes (the `_der` variants). The `verify` family never
//! errors on untrusted input; it answers `false`.

mod encoding;
mod generate;
mod internals;
mod key;
mod pkcs1v15;

pub use self::key::{check_public, PublicKeyParts, RsaPrivateKey, RsaPublicKey};

use alloc::vec::Vec;

use rand_core::CryptoRngCore;

use crate::errors::Result;
use crate::hash::Hash;

/// Generates a private key of `bits` bits with public exponent 65537.
///
/// `bits` must be one of 512, 1024, 2048, 4096 or 8192.
pub fn generate_key<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
) -> Result<RsaPrivateKey> {
    generate::generate_key(rng, bits)
}

/// The public key belonging to `key`.
pub fn public_key_create(key: &RsaPrivateKey) -> RsaPublicKey {
    key.to_public_key()
}

/// Checks the public well-formedness bounds of `key`.
pub fn public_key_verify(key: &RsaPublicKey) -> bool {
    check_public(key).is_ok()
}

/// Full private-key validation, including primality of the factors.
pub fn private_key_verify<R: CryptoRngCore + ?Sized>(rng: &mut R, key: &RsaPrivateKey) -> bool {
    key.validate(rng).is_ok()
}

/// Signs `msg` with RSASSA-PKCS1-v1_5 under the given hash.
///
/// Supplying an RNG enables blinding of the private operation and is
/// recommended whenever one is available.
pub fn sign<R: CryptoRngCore + ?Sized, H: Hash + ?Sized>(
    rng: Option<&mut R>,
    hash: &H,
    msg: &[u8],
    key: &RsaPrivateKey,
) -> Result<Vec<u8>> {
    pkcs1v15::sign(rng, key, hash, msg)
}

/// Verifies an RSASSA-PKCS1-v1_5 signature. Malformed signatures, wrong
/// lengths and mismatches all answer `false`.
pub fn verify<H: Hash + ?Sized>(hash: &H, msg: &[u8], sig: &[u8], key: &RsaPublicKey) -> bool {
    pkcs1v15::verify(key, hash, msg, sig).is_ok()
}

/// [`public_key_create`] over DER: extracts `RSAPublicKey` DER from
/// `RSAPrivateKey` DER.
pub fn public_key_create_der(private_der: &[u8]) -> Result<Vec<u8>> {
    let key = RsaPrivateKey::from_der(private_der)?;
    Ok(key.to_public_key().to_der())
}

/// [`public_key_verify`] over `RSAPublicKey` DER.
pub fn public_key_verify_der(public_der: &[u8]) -> bool {
    match RsaPublicKey::from_der(public_der) {
        Ok(key) => public_key_verify(&key),
        Err(_) => false,
    }
}

/// [`private_key_verify`] over `RSAPrivateKey` DER.
pub fn private_key_verify_der<R: CryptoRngCore + ?Sized>(rng: &mut R, private_der: &[u8]) -> bool {
    match RsaPrivateKey::from_der(private_der) {
        Ok(key) => private_key_verify(rng, &key),
        Err(_) => false,
    }
}

/// [`sign`] over `RSAPrivateKey` DER.
pub fn sign_der<R: CryptoRngCore + ?Sized, H: Hash + ?Sized>(
    rng: Option<&mut R>,
    hash: &H,
    msg: &[u8],
    private_der: &[u8],
) -> Result<Vec<u8>> {
    let key = RsaPrivateKey::from_der(private_der)?;
    sign(rng, hash, msg, &key)
}

/// [`verify`] over `RSAPublicKey` DER.
pub fn verify_der<H: Hash + ?Sized>(
    hash: &H,
    msg: &[u8],
    sig: &[u8],
    public_der: &[u8],
) -> bool {
    match RsaPublicKey::from_der(public_der) {
        Ok(key) => verify(hash, msg, sig, &key),
        Err(_) => false,
    }
}
