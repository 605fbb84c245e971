//! Extended Euclidean algorithm and modular inverses.

use num_traits::{One, Zero};

use super::bigint::{BigInt, Sign};
use super::BigUint;

/// Extended Euclidean algorithm.
///
/// Returns `(g, s, t)` with `g = gcd(a, b)` and `a·s + b·t = g`.
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigInt, BigInt, BigInt) {
    let mut a = BigInt::from_biguint(Sign::Plus, a.clone());
    let mut b = BigInt::from_biguint(Sign::Plus, b.clone());

    let mut ua = BigInt::one();
    let mut va = BigInt::zero();

    let mut ub = BigInt::zero();
    let mut vb = BigInt::one();

    while !b.is_zero() {
        // a and b stay nonnegative throughout; only the coefficients
        // alternate in sign.
        let (q, r) = a.magnitude().div_rem(b.magnitude());
        let q = BigInt::from(q);

        a = b;
        b = BigInt::from(r);

        let tmp = ua;
        ua = ub.clone();
        ub = tmp - &q * &ub;

        let tmp = va;
        va = vb.clone();
        vb = tmp - &q * &vb;
    }

    (a, ua, va)
}

/// The inverse of `g` modulo `n`, or `None` when `gcd(g, n) != 1`.
pub(super) fn mod_inverse(g: &BigUint, n: &BigUint) -> Option<BigUint> {
    if n.is_zero() {
        return None;
    }
    if n.is_one() {
        return Some(BigUint::zero());
    }
    let g = if g >= n { g % n } else { g.clone() };
    if g.is_zero() {
        return None;
    }

    let (d, x, _) = extended_gcd(&g, n);
    if !d.is_one() {
        return None;
    }

    if x.is_negative() {
        Some(n - x.magnitude())
    } else {
        x.to_biguint()
    }
}
