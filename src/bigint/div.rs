//! Long division.
//!
//! Knuth's algorithm D (TAOCP vol. 2, 4.3.1) over 64-bit limbs with the
//! usual three-limb quotient estimate, after normalizing the divisor so
//! its top bit is set.

use alloc::vec::Vec;

use num_traits::Zero;

use super::BigUint;

pub(super) fn div_rem(u: &BigUint, v: &BigUint) -> (BigUint, BigUint) {
    if v.is_zero() {
        panic!("attempt to divide by zero");
    }
    if u < v {
        return (BigUint::zero(), u.clone());
    }
    if v.limbs.len() == 1 {
        let (q, r) = div_rem_limb(&u.limbs, v.limbs[0]);
        return (BigUint::from_limbs(q), BigUint::from(r));
    }
    div_rem_knuth(&u.limbs, &v.limbs)
}

fn div_rem_limb(u: &[u64], v: u64) -> (Vec<u64>, u64) {
    let mut q = vec![0u64; u.len()];
    let mut r = 0u64;
    for i in (0..u.len()).rev() {
        let acc = (u128::from(r) << 64) | u128::from(u[i]);
        q[i] = (acc / u128::from(v)) as u64;
        r = (acc % u128::from(v)) as u64;
    }
    (q, r)
}

fn div_rem_knuth(u: &[u64], v: &[u64]) -> (BigUint, BigUint) {
    let n = v.len();
    let m = u.len();
    debug_assert!(n >= 2 && m >= n);

    let shift = v[n - 1].leading_zeros() as usize;
    let vn = shl_fixed(v, shift, false);
    let mut un = shl_fixed(u, shift, true); // m + 1 limbs
    let mut q = vec![0u64; m - n + 1];

    for j in (0..=m - n).rev() {
        let u2 = un[j + n];
        let u1 = un[j + n - 1];
        let u0 = un[j + n - 2];

        // Estimate the quotient limb from the top three dividend limbs and
        // the top two divisor limbs, then correct it (at most twice).
        let num = (u128::from(u2) << 64) | u128::from(u1);
        let (mut qhat, mut rhat) = if u2 >= vn[n - 1] {
            (u128::from(u64::MAX), num - u128::from(u64::MAX) * u128::from(vn[n - 1]))
        } else {
            (num / u128::from(vn[n - 1]), num % u128::from(vn[n - 1]))
        };
        while rhat <= u128::from(u64::MAX)
            && qhat * u128::from(vn[n - 2]) > (rhat << 64) | u128::from(u0)
        {
            qhat -= 1;
            rhat += u128::from(vn[n - 1]);
        }
        let qhat = qhat as u64;

        // un[j..j+n+1] -= qhat * vn
        let mut carry = 0u128;
        let mut borrow = 0u64;
        for i in 0..n {
            let p = u128::from(qhat) * u128::from(vn[i]) + carry;
            carry = p >> 64;
            let (d, b1) = un[j + i].overflowing_sub(p as u64);
            let (d, b2) = d.overflowing_sub(borrow);
            un[j + i] = d;
            borrow = u64::from(b1) + u64::from(b2);
        }
        let (d, b1) = un[j + n].overflowing_sub(carry as u64);
        let (d, b2) = d.overflowing_sub(borrow);
        un[j + n] = d;

        if b1 || b2 {
            // The estimate was one too high; add the divisor back.
            q[j] = qhat - 1;
            let mut carry = 0u128;
            for i in 0..n {
                let acc = u128::from(un[j + i]) + u128::from(vn[i]) + carry;
                un[j + i] = acc as u64;
                carry = acc >> 64;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u64);
        } else {
            q[j] = qhat;
        }
    }

    let r = BigUint::from_limbs(un[..n].to_vec()) >> shift;
    (BigUint::from_limbs(q), r)
}

/// `value << shift` for `shift < 64`; `extend` forces the extra top limb
/// even when it is zero.
fn shl_fixed(limbs: &[u64], shift: usize, extend: bool) -> Vec<u64> {
    let mut out = Vec::with_capacity(limbs.len() + 1);
    let mut carry = 0u64;
    for &limb in limbs {
        if shift == 0 {
            out.push(limb);
        } else {
            out.push((limb << shift) | carry);
            carry = limb >> (64 - shift);
        }
    }
    if extend || carry != 0 {
        out.push(carry);
    }
    out
}
