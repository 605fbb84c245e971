//! Raw RSA operations.
//!
//! Exponentiation with the private exponents always goes through the
//! constant-time ladder, and callers may supply an RNG to blind the
//! message representative so the operation's timing is independent of it.

use num_traits::Zero;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::bigint::{BigUint, RandBigUint};
use crate::errors::{Error, Result};
use crate::rsa::key::{PublicKeyParts, RsaPrivateKey};

/// Raw RSA public operation `m^e mod n`. No padding.
#[inline]
pub(crate) fn encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> BigUint {
    m.modpow(key.e(), key.n())
}

/// Raw RSA private operation `c^d mod n` via the CRT, blinded when an RNG
/// is supplied.
pub(crate) fn decrypt<R: CryptoRngCore + ?Sized>(
    rng: Option<&mut R>,
    key: &RsaPrivateKey,
    c: &BigUint,
) -> Result<BigUint> {
    if key.n.is_zero() || c >= &key.n {
        return Err(Error::Internal);
    }

    let (c, unblinder) = match rng {
        Some(rng) => {
            let (blinded, unblinder) = blind(rng, key, c);
            (blinded, Some(unblinder))
        }
        None => (c.clone(), None),
    };

    // Garner recombination: m = m2 + q·(qinv·(m1 - m2) mod p).
    let m1 = c.modpow_consttime(&key.dp, &key.p);
    let mut m2 = c.modpow_consttime(&key.dq, &key.q);
    // Imported keys may have q > p, so reduce before taking the
    // difference.
    let mut diff = (&m1 + &key.p) - &(&m2 % &key.p);
    if diff >= key.p {
        diff -= &key.p;
    }
    let h = (&key.qinv * &diff) % &key.p;
    let mut m = &m2 + &(&h * &key.q);
    diff.zeroize();
    m2.zeroize();

    if let Some(mut unblinder) = unblinder {
        m = unblind(key, &m, &unblinder);
        unblinder.zeroize();
    }
    Ok(m)
}

/// [`decrypt`], then a public-exponent cross-check that defends against
/// fault-injected or corrupted CRT arithmetic leaking the factors.
pub(crate) fn decrypt_and_check<R: CryptoRngCore + ?Sized>(
    rng: Option<&mut R>,
    key: &RsaPrivateKey,
    c: &BigUint,
) -> Result<BigUint> {
    let m = decrypt(rng, key, c)?;
    if &encrypt(key, &m) != c {
        return Err(Error::Internal);
    }
    Ok(m)
}

/// Multiplies `c` by `r^e` for a random invertible `r`; returns the
/// blinded value and the unblinding factor `r^-1 mod n`.
fn blind<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key: &RsaPrivateKey,
    c: &BigUint,
) -> (BigUint, BigUint) {
    let (mut r, unblinder) = loop {
        let r = rng.gen_biguint_nonzero_below(&key.n);
        // gcd(r, n) = 1 exactly when the inverse exists.
        if let Some(inverse) = r.mod_inverse(&key.n) {
            break (r, inverse);
        }
    };

    let mut rpowe = r.modpow(&key.e, &key.n);
    let blinded = (c * &rpowe) % &key.n;
    rpowe.zeroize();
    r.zeroize();

    (blinded, unblinder)
}

fn unblind(key: &RsaPrivateKey, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % &key.n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::generate;
    use num_traits::One;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn decrypt_inverts_encrypt() {
        let mut rng = ChaCha8Rng::from_seed([21; 32]);
        let key = generate::generate_key(&mut rng, 512).unwrap();
        let m = BigUint::from(42u64);
        let c = encrypt(&key, &m);

        let plain = decrypt::<ChaCha8Rng>(None, &key, &c).unwrap();
        assert_eq!(plain, m);

        let blinded = decrypt(Some(&mut rng), &key, &c).unwrap();
        assert_eq!(blinded, m);

        let checked = decrypt_and_check(Some(&mut rng), &key, &c).unwrap();
        assert_eq!(checked, m);
    }

    #[test]
    fn oversized_input_is_rejected() {
        let mut rng = ChaCha8Rng::from_seed([22; 32]);
        let key = generate::generate_key(&mut rng, 512).unwrap();
        let too_big = key.n.clone() + BigUint::one();
        assert!(decrypt::<ChaCha8Rng>(None, &key, &too_big).is_err());
        assert!(decrypt::<ChaCha8Rng>(None, &key, &key.n.clone()).is_err());
    }
}
