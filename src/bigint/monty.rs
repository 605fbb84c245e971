//! Montgomery exponentiation.
//!
//! A [`MontyContext`] caches, for an odd modulus m of n limbs, the values
//! (m, k0 = -m⁻¹ mod 2⁶⁴, R² mod m, R mod m) with R = 2^(64·n).
//! Multiplication is CIOS (coarsely integrated operand scanning); the
//! trailing subtraction is a masked select, not a branch.
//!
//! Two exponentiation ladders share the machinery: a variable-time 4-bit
//! window for public exponents, and a fixed-window ladder for secret
//! exponents that performs an identical square/multiply schedule for every
//! exponent of a given limb width and reads its table by masked scan.

use alloc::vec::Vec;

use num_traits::One;
use zeroize::Zeroize;

use super::BigUint;

const WINDOW: usize = 4;
const TABLE_LEN: usize = 1 << WINDOW;

pub(super) struct MontyContext {
    m: Vec<u64>,
    k0: u64,
    rr: Vec<u64>,
    one: Vec<u64>,
}

impl MontyContext {
    /// `modulus` must be odd and > 1.
    pub(super) fn new(modulus: &BigUint) -> Self {
        debug_assert!(modulus.bit(0) && !modulus.is_one());
        let m = modulus.limbs().to_vec();
        let n = m.len();

        // Newton iteration doubles the valid low bits each round, so six
        // rounds cover 64 bits starting from the (3-bit exact) seed m[0].
        let mut inv = m[0];
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(m[0].wrapping_mul(inv)));
        }
        let k0 = inv.wrapping_neg();

        let rr = (BigUint::one() << (128 * n)) % modulus;
        let one = (BigUint::one() << (64 * n)) % modulus;
        MontyContext {
            k0,
            rr: pad(&rr, n),
            one: pad(&one, n),
            m,
        }
    }

    fn width(&self) -> usize {
        self.m.len()
    }

    /// Montgomery product x·y·R⁻¹ mod m. Inputs are n-limb, reduced.
    fn mul(&self, x: &[u64], y: &[u64]) -> Vec<u64> {
        let n = self.width();
        let mut t = vec![0u64; n + 2];
        for i in 0..n {
            let xi = u128::from(x[i]);
            let mut c = 0u128;
            for j in 0..n {
                let s = u128::from(t[j]) + xi * u128::from(y[j]) + c;
                t[j] = s as u64;
                c = s >> 64;
            }
            let s = u128::from(t[n]) + c;
            t[n] = s as u64;
            t[n + 1] = (s >> 64) as u64;

            let m_i = u128::from(t[0].wrapping_mul(self.k0));
            let s = u128::from(t[0]) + m_i * u128::from(self.m[0]);
            let mut c = s >> 64;
            for j in 1..n {
                let s = u128::from(t[j]) + m_i * u128::from(self.m[j]) + c;
                t[j - 1] = s as u64;
                c = s >> 64;
            }
            let s = u128::from(t[n]) + c;
            t[n - 1] = s as u64;
            t[n] = t[n + 1] + (s >> 64) as u64;
            t[n + 1] = 0;
        }

        // Result is < 2m; subtract m and keep whichever did not borrow,
        // selected by mask rather than branch.
        let mut diff = vec![0u64; n];
        let mut borrow = 0u64;
        for i in 0..n {
            let (d, b1) = t[i].overflowing_sub(self.m[i]);
            let (d, b2) = d.overflowing_sub(borrow);
            diff[i] = d;
            borrow = u64::from(b1) + u64::from(b2);
        }
        let (_, top_borrow) = t[n].overflowing_sub(borrow);
        let keep_t = 0u64.wrapping_sub(u64::from(top_borrow));
        for i in 0..n {
            diff[i] = (t[i] & keep_t) | (diff[i] & !keep_t);
        }
        t.zeroize();
        diff
    }

    fn to_monty(&self, x: &BigUint) -> Vec<u64> {
        let reduced = x % &BigUint::from_limbs(self.m.clone());
        self.mul(&pad(&reduced, self.width()), &self.rr)
    }

    fn from_monty(&self, x: &[u64]) -> BigUint {
        let mut unit = vec![0u64; self.width()];
        unit[0] = 1;
        BigUint::from_limbs(self.mul(x, &unit))
    }

    fn table(&self, base: &BigUint) -> Vec<Vec<u64>> {
        let base_m = self.to_monty(base);
        let mut table = Vec::with_capacity(TABLE_LEN);
        table.push(self.one.clone());
        table.push(base_m);
        for i in 2..TABLE_LEN {
            let next = self.mul(&table[i - 1], &table[1]);
            table.push(next);
        }
        table
    }

    /// Fixed-window ladder: for every window (including leading zero
    /// windows) four squarings and one multiplication by a masked-scan
    /// table entry. The schedule depends only on the wider of the modulus
    /// and exponent limb counts.
    pub(super) fn pow_consttime(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        let n = self.width();
        let table = self.table(base);

        let mut exp = exponent.limbs().to_vec();
        exp.resize(exp.len().max(n), 0);

        let mut acc = self.one.clone();
        let mut entry = vec![0u64; n];
        for li in (0..exp.len()).rev() {
            let limb = exp[li];
            for w in (0..64 / WINDOW).rev() {
                for _ in 0..WINDOW {
                    acc = self.mul(&acc, &acc);
                }
                let window = (limb >> (w * WINDOW)) & (TABLE_LEN as u64 - 1);
                select(&table, window, &mut entry);
                acc = self.mul(&acc, &entry);
            }
        }
        exp.zeroize();
        entry.zeroize();
        self.from_monty(&acc)
    }

    /// Variable-time 4-bit window; skips leading zero windows and the
    /// multiplication for zero windows.
    pub(super) fn pow_vartime(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        let bits = exponent.bits();
        if bits == 0 {
            return self.from_monty(&self.one);
        }
        let table = self.table(base);
        let windows = (bits + WINDOW - 1) / WINDOW;

        let mut acc = table[nibble(exponent, windows - 1) as usize].clone();
        for w in (0..windows - 1).rev() {
            for _ in 0..WINDOW {
                acc = self.mul(&acc, &acc);
            }
            let win = nibble(exponent, w);
            if win != 0 {
                acc = self.mul(&acc, &table[win as usize]);
            }
        }
        self.from_monty(&acc)
    }
}

impl Drop for MontyContext {
    fn drop(&mut self) {
        self.m.zeroize();
        self.rr.zeroize();
        self.one.zeroize();
        self.k0.zeroize();
    }
}

fn pad(x: &BigUint, n: usize) -> Vec<u64> {
    let mut out = x.limbs().to_vec();
    debug_assert!(out.len() <= n);
    out.resize(n, 0);
    out
}

/// `out = table[index]` without indexing by `index`: every entry is
/// scanned and folded in under an all-ones or all-zeros mask.
fn select(table: &[Vec<u64>], index: u64, out: &mut [u64]) {
    for limb in out.iter_mut() {
        *limb = 0;
    }
    for (i, entry) in table.iter().enumerate() {
        let x = index ^ i as u64;
        let mask = ((x | x.wrapping_neg()) >> 63).wrapping_sub(1);
        for (o, &e) in out.iter_mut().zip(entry.iter()) {
            *o |= e & mask;
        }
    }
}

/// The `w`-th 4-bit window of `x`, counted from the least significant end.
fn nibble(x: &BigUint, w: usize) -> u64 {
    let bit = w * WINDOW;
    let limbs = x.limbs();
    let li = bit / 64;
    if li >= limbs.len() {
        return 0;
    }
    let off = bit % 64;
    let mut v = limbs[li] >> off;
    if off > 64 - WINDOW && li + 1 < limbs.len() {
        v |= limbs[li + 1] << (64 - off);
    }
    v & (TABLE_LEN as u64 - 1)
}
