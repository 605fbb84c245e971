//! DSA signing and verification.
//!
//! The message argument is the caller's already-hashed digest; it is
//! interpreted as a big-endian integer, truncated to the leftmost q-width
//! bytes when longer. Signatures are the raw pair `(r, s)`, each half
//! left-padded to exactly `⌈N/8⌉` bytes.

use alloc::vec::Vec;

use num_traits::Zero;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::bigint::{BigUint, RandBigUint};
use crate::dsa::key::{DsaPrivateKey, DsaPublicKey};
use crate::errors::{Error, Result};

/// Longest accepted digest, matching a 512-bit hash.
const MAX_MSG_LEN: usize = 64;

/// How many nonces are tried before signing reports failure. Each retry
/// only triggers on r = 0 or s = 0, so reaching the budget on honest
/// parameters is not realistically possible.
const SIGN_ATTEMPTS: usize = 10;

/// A DSA signature: `r` and `s`, each exactly the byte width of q.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    r: Vec<u8>,
    s: Vec<u8>,
}

impl Signature {
    /// Wraps raw signature halves as received from the wire.
    pub fn from_parts(r: Vec<u8>, s: Vec<u8>) -> Self {
        Signature { r, s }
    }

    /// The r half.
    pub fn r(&self) -> &[u8] {
        &self.r
    }

    /// The s half.
    pub fn s(&self) -> &[u8] {
        &self.s
    }
}

/// The digest as an integer: the leftmost `q_size` bytes, big-endian.
fn message_repr(msg: &[u8], q_size: usize) -> BigUint {
    BigUint::from_bytes_be(&msg[..msg.len().min(q_size)])
}

fn check_message(msg: &[u8], key_q_bits: usize) -> Result<()> {
    // The low-level interface requires byte-aligned q so the fixed-width
    // signature halves are well defined.
    if key_q_bits % 8 != 0 {
        return Err(Error::InvalidParameter);
    }
    if msg.is_empty() || msg.len() > MAX_MSG_LEN {
        return Err(Error::InvalidParameter);
    }
    Ok(())
}

/// Signs a digest. Fails with [`Error::SignatureFailed`] only if ten
/// consecutive nonces produce a degenerate r or s.
pub(crate) fn sign<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    msg: &[u8],
    key: &DsaPrivateKey,
) -> Result<Signature> {
    let params = key.params();
    params.check_sanity()?;
    check_message(msg, params.q().bits())?;

    let p = params.p();
    let q = params.q();
    let g = params.g();
    let q_size = params.q_size();
    let z = message_repr(msg, q_size);

    for _ in 0..SIGN_ATTEMPTS {
        let mut k = rng.gen_biguint_nonzero_below(q);

        let r = &g.modpow_consttime(&k, p) % q;
        if r.is_zero() {
            k.zeroize();
            continue;
        }

        let mut kinv = match k.mod_inverse(q) {
            Some(kinv) => kinv,
            None => {
                k.zeroize();
                continue;
            }
        };
        let s = (&kinv * &(&z + &(key.x() * &r))) % q;
        k.zeroize();
        kinv.zeroize();
        if s.is_zero() {
            continue;
        }

        let r = r.to_bytes_be_pad(q_size).ok_or(Error::Internal)?;
        let s = s.to_bytes_be_pad(q_size).ok_or(Error::Internal)?;
        return Ok(Signature { r, s });
    }

    Err(Error::SignatureFailed)
}

/// Fallible core of signature verification.
pub(crate) fn verify_inner(
    msg: &[u8],
    sig: &Signature,
    key: &DsaPublicKey,
) -> Result<()> {
    let params = key.params();
    params.check_sanity()?;
    check_message(msg, params.q().bits())?;

    let p = params.p();
    let q = params.q();
    let g = params.g();
    let q_size = params.q_size();

    if key.y().is_zero() || key.y() >= p {
        return Err(Error::Verification);
    }
    if sig.r.len() != q_size || sig.s.len() != q_size {
        return Err(Error::Verification);
    }

    let r = BigUint::from_bytes_be(&sig.r);
    let s = BigUint::from_bytes_be(&sig.s);
    if r.is_zero() || &r >= q || s.is_zero() || &s >= q {
        return Err(Error::Verification);
    }

    let z = message_repr(msg, q_size);
    let w = s.mod_inverse(q).ok_or(Error::Verification)?;
    let u1 = (&z * &w) % q;
    let u2 = (&r * &w) % q;
    let v = &((&g.modpow(&u1, p) * &key.y().modpow(&u2, p)) % p) % q;

    if v == r {
        Ok(())
    } else {
        Err(Error::Verification)
    }
}
