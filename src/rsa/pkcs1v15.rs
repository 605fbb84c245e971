//! RSASSA-PKCS1-v1_5 as described in RFC 8017 § 8.2.

use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::bigint::BigUint;
use crate::errors::{Error, Result};
use crate::hash::Hash;
use crate::rsa::internals;
use crate::rsa::key::{check_public, PublicKeyParts, RsaPrivateKey, RsaPublicKey};

/// EMSA-PKCS1-v1_5 encoding: `EM = 0x00 || 0x01 || PS || 0x00 || T` with
/// `T = DigestInfo || digest` and PS at least eight 0xff bytes.
pub(crate) fn sign_pad(prefix: &[u8], digest: &[u8], k: usize) -> Result<Vec<u8>> {
    let t_len = prefix.len() + digest.len();
    if k < t_len + 11 {
        return Err(Error::MessageTooLong);
    }

    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - digest.len()].copy_from_slice(prefix);
    em[k - digest.len()..].copy_from_slice(digest);
    Ok(em)
}

/// Signs `msg` with the given hash. Blinds the private operation when an
/// RNG is supplied.
pub(crate) fn sign<R: CryptoRngCore + ?Sized, H: Hash + ?Sized>(
    rng: Option<&mut R>,
    key: &RsaPrivateKey,
    hash: &H,
    msg: &[u8],
) -> Result<Vec<u8>> {
    check_public(key)?;

    let digest = hash.digest(msg);
    let k = key.size();
    let mut em = sign_pad(hash.asn1_prefix(), &digest, k)?;
    let m = BigUint::from_bytes_be(&em);
    em.zeroize();

    let s = internals::decrypt_and_check(rng, key, &m)?;
    s.to_bytes_be_pad(k).ok_or(Error::Internal)
}

/// Verifies a signature by the encode-and-compare strategy: the expected
/// encoded message is rebuilt from scratch and compared against the
/// decoded one in constant time over the full modulus width. The signed
/// payload is never parsed.
pub(crate) fn verify<H: Hash + ?Sized>(
    key: &RsaPublicKey,
    hash: &H,
    msg: &[u8],
    sig: &[u8],
) -> Result<()> {
    check_public(key)?;

    let k = key.size();
    if sig.len() != k {
        return Err(Error::Verification);
    }
    let s = BigUint::from_bytes_be(sig);
    if &s >= key.n() {
        return Err(Error::Verification);
    }

    let em = internals::encrypt(key, &s)
        .to_bytes_be_pad(k)
        .ok_or(Error::Verification)?;

    let digest = hash.digest(msg);
    let expected = sign_pad(hash.asn1_prefix(), &digest, k).map_err(|_| Error::Verification)?;

    if em.ct_eq(&expected).into() {
        Ok(())
    } else {
        Err(Error::Verification)
    }
}
