//! Arbitrary precision integers.
//!
//! [`BigUint`] is an unsigned magnitude stored as little-endian `u64`
//! limbs, kept normalized (no most-significant zero limb, zero is the
//! empty limb vector). Arithmetic produces new values; buffers are only
//! mutated internally. [`BigInt`] adds a sign and exists for the extended
//! Euclidean algorithm, whose Bezout coefficients go negative.
//!
//! Exponentiation is Montgomery-based for odd moduli. The
//! [`BigUint::modpow_consttime`] ladder performs the same square/multiply
//! schedule for every exponent of a given width and selects table entries
//! by masked scan, never by secret index.

mod bigint;
mod div;
mod inverse;
mod monty;
mod rand;

pub use self::bigint::{BigInt, Sign};
pub use self::inverse::extended_gcd;
pub use self::rand::RandBigUint;

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Rem, Shl, Shr, Sub, SubAssign};

use num_integer::Integer;
use num_traits::{FromPrimitive, Num, One, ToPrimitive, Zero};
use zeroize::Zeroize;

/// An arbitrary precision unsigned integer.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BigUint {
    /// Little-endian limbs; normalized, so the top limb is never zero and
    /// zero is the empty vector.
    limbs: Vec<u64>,
}

impl BigUint {
    pub(crate) fn from_limbs(mut limbs: Vec<u64>) -> Self {
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        BigUint { limbs }
    }

    pub(crate) fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    /// Interprets `bytes` as a big-endian unsigned integer. Leading zero
    /// bytes are ignored; the empty slice is zero.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len() / 8 + 1);
        let mut iter = bytes.rchunks(8);
        for chunk in &mut iter {
            let mut limb = 0u64;
            for &b in chunk {
                limb = (limb << 8) | u64::from(b);
            }
            limbs.push(limb);
        }
        BigUint::from_limbs(limbs)
    }

    /// Canonical big-endian bytes: no leading zero byte, empty for zero.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.limbs.len() * 8);
        for (i, &limb) in self.limbs.iter().rev().enumerate() {
            let bytes = limb.to_be_bytes();
            if i == 0 {
                let skip = (limb.leading_zeros() / 8) as usize;
                out.extend_from_slice(&bytes[skip..]);
            } else {
                out.extend_from_slice(&bytes);
            }
        }
        out
    }

    /// Big-endian bytes left-padded with zeros to exactly `len` bytes.
    /// Returns `None` when the value does not fit.
    pub fn to_bytes_be_pad(&self, len: usize) -> Option<Vec<u8>> {
        let bytes = self.to_bytes_be();
        if bytes.len() > len {
            return None;
        }
        let mut out = vec![0u8; len];
        out[len - bytes.len()..].copy_from_slice(&bytes);
        Some(out)
    }

    /// The minimal number of bits needed to represent the value; 0 for 0.
    pub fn bits(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(&top) => self.limbs.len() * 64 - top.leading_zeros() as usize,
        }
    }

    /// The byte length of the canonical big-endian form.
    pub fn byte_len(&self) -> usize {
        (self.bits() + 7) / 8
    }

    /// Reads the bit at position `bit` (0 = least significant).
    pub fn bit(&self, bit: usize) -> bool {
        let limb = bit / 64;
        if limb >= self.limbs.len() {
            return false;
        }
        (self.limbs[limb] >> (bit % 64)) & 1 == 1
    }

    /// Sets or clears the bit at position `bit`.
    pub fn set_bit(&mut self, bit: usize, value: bool) {
        let limb = bit / 64;
        if value {
            if limb >= self.limbs.len() {
                self.limbs.resize(limb + 1, 0);
            }
            self.limbs[limb] |= 1u64 << (bit % 64);
        } else if limb < self.limbs.len() {
            self.limbs[limb] &= !(1u64 << (bit % 64));
            while self.limbs.last() == Some(&0) {
                self.limbs.pop();
            }
        }
    }

    /// The number of trailing zero bits, or `None` for zero.
    pub fn trailing_zeros(&self) -> Option<usize> {
        for (i, &limb) in self.limbs.iter().enumerate() {
            if limb != 0 {
                return Some(i * 64 + limb.trailing_zeros() as usize);
            }
        }
        None
    }

    /// Quotient and remainder in one pass.
    ///
    /// # Panics
    ///
    /// Panics when `divisor` is zero.
    pub fn div_rem(&self, divisor: &BigUint) -> (BigUint, BigUint) {
        div::div_rem(self, divisor)
    }

    /// Modular exponentiation, variable time in all operands.
    ///
    /// Uses Montgomery reduction with a 4-bit window for odd moduli and a
    /// plain square-and-multiply fallback otherwise.
    ///
    /// # Panics
    ///
    /// Panics when `modulus` is zero.
    pub fn modpow(&self, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        if modulus.is_zero() {
            panic!("attempt to calculate modpow with zero modulus");
        }
        if modulus.is_one() {
            return BigUint::zero();
        }
        if modulus.is_odd() {
            monty::MontyContext::new(modulus).pow_vartime(self, exponent)
        } else {
            self.modpow_binary(exponent, modulus)
        }
    }

    /// Modular exponentiation whose square/multiply schedule and table
    /// accesses do not depend on the exponent value, only on its limb
    /// width. Intended for exponents derived from private key material.
    ///
    /// The modulus must be odd; an even modulus falls back to the
    /// variable-time path.
    pub fn modpow_consttime(&self, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        if modulus.is_odd() && !modulus.is_one() {
            monty::MontyContext::new(modulus).pow_consttime(self, exponent)
        } else {
            self.modpow(exponent, modulus)
        }
    }

    fn modpow_binary(&self, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        let mut result = BigUint::one();
        let base = self % modulus;
        for i in (0..exponent.bits()).rev() {
            result = &(&result * &result) % modulus;
            if exponent.bit(i) {
                result = &(&result * &base) % modulus;
            }
        }
        result
    }

    /// The multiplicative inverse modulo `m`, or `None` when
    /// `gcd(self, m) != 1`.
    pub fn mod_inverse(&self, m: &BigUint) -> Option<BigUint> {
        inverse::mod_inverse(self, m)
    }

    fn add_ref(&self, other: &BigUint) -> BigUint {
        let (long, short) = if self.limbs.len() >= other.limbs.len() {
            (&self.limbs, &other.limbs)
        } else {
            (&other.limbs, &self.limbs)
        };
        let mut out = Vec::with_capacity(long.len() + 1);
        let mut carry = 0u128;
        for i in 0..long.len() {
            let mut acc = carry + u128::from(long[i]);
            if i < short.len() {
                acc += u128::from(short[i]);
            }
            out.push(acc as u64);
            carry = acc >> 64;
        }
        if carry != 0 {
            out.push(carry as u64);
        }
        BigUint { limbs: out }
    }

    fn sub_ref(&self, other: &BigUint) -> BigUint {
        if self < other {
            panic!("attempt to subtract a larger BigUint");
        }
        let mut out = self.limbs.clone();
        let mut borrow = 0u64;
        for i in 0..out.len() {
            let rhs = other.limbs.get(i).copied().unwrap_or(0);
            let (d, b1) = out[i].overflowing_sub(rhs);
            let (d, b2) = d.overflowing_sub(borrow);
            out[i] = d;
            borrow = u64::from(b1) + u64::from(b2);
        }
        debug_assert_eq!(borrow, 0);
        BigUint::from_limbs(out)
    }

    fn mul_ref(&self, other: &BigUint) -> BigUint {
        if self.is_zero() || other.is_zero() {
            return BigUint::zero();
        }
        let mut out = vec![0u64; self.limbs.len() + other.limbs.len()];
        for (i, &a) in self.limbs.iter().enumerate() {
            let mut carry = 0u128;
            for (j, &b) in other.limbs.iter().enumerate() {
                let acc = u128::from(a) * u128::from(b) + u128::from(out[i + j]) + carry;
                out[i + j] = acc as u64;
                carry = acc >> 64;
            }
            out[i + other.limbs.len()] = carry as u64;
        }
        BigUint::from_limbs(out)
    }

    fn shl_bits(&self, shift: usize) -> BigUint {
        if self.is_zero() || shift == 0 {
            return self.clone();
        }
        let limb_shift = shift / 64;
        let bit_shift = shift % 64;
        let mut out = vec![0u64; self.limbs.len() + limb_shift + 1];
        for (i, &limb) in self.limbs.iter().enumerate() {
            if bit_shift == 0 {
                out[i + limb_shift] = limb;
            } else {
                out[i + limb_shift] |= limb << bit_shift;
                out[i + limb_shift + 1] = limb >> (64 - bit_shift);
            }
        }
        BigUint::from_limbs(out)
    }

    fn shr_bits(&self, shift: usize) -> BigUint {
        let limb_shift = shift / 64;
        if limb_shift >= self.limbs.len() {
            return BigUint::zero();
        }
        let bit_shift = shift % 64;
        let mut out = Vec::with_capacity(self.limbs.len() - limb_shift);
        for i in limb_shift..self.limbs.len() {
            let mut limb = self.limbs[i] >> bit_shift;
            if bit_shift != 0 && i + 1 < self.limbs.len() {
                limb |= self.limbs[i + 1] << (64 - bit_shift);
            }
            out.push(limb);
        }
        BigUint::from_limbs(out)
    }
}

impl Zero for BigUint {
    fn zero() -> Self {
        BigUint { limbs: Vec::new() }
    }

    fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }
}

impl One for BigUint {
    fn one() -> Self {
        BigUint { limbs: vec![1] }
    }

    fn is_one(&self) -> bool {
        self.limbs == [1]
    }
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.limbs.len().cmp(&other.limbs.len()) {
            Ordering::Equal => {
                for (a, b) in self.limbs.iter().rev().zip(other.limbs.iter().rev()) {
                    match a.cmp(b) {
                        Ordering::Equal => continue,
                        ord => return ord,
                    }
                }
                Ordering::Equal
            }
            ord => ord,
        }
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Forwards the owned/borrowed operator combinations to one by-reference
/// implementation.
macro_rules! forward_binop {
    ($trait:ident, $method:ident, $impl:ident) => {
        impl $trait<&BigUint> for &BigUint {
            type Output = BigUint;
            fn $method(self, other: &BigUint) -> BigUint {
                self.$impl(other)
            }
        }
        impl $trait<BigUint> for &BigUint {
            type Output = BigUint;
            fn $method(self, other: BigUint) -> BigUint {
                self.$impl(&other)
            }
        }
        impl $trait<&BigUint> for BigUint {
            type Output = BigUint;
            fn $method(self, other: &BigUint) -> BigUint {
                self.$impl(other)
            }
        }
        impl $trait<BigUint> for BigUint {
            type Output = BigUint;
            fn $method(self, other: BigUint) -> BigUint {
                self.$impl(&other)
            }
        }
    };
}

impl BigUint {
    fn div_ref(&self, other: &BigUint) -> BigUint {
        self.div_rem(other).0
    }

    fn rem_ref(&self, other: &BigUint) -> BigUint {
        self.div_rem(other).1
    }
}

forward_binop!(Add, add, add_ref);
forward_binop!(Sub, sub, sub_ref);
forward_binop!(Mul, mul, mul_ref);
forward_binop!(Div, div, div_ref);
forward_binop!(Rem, rem, rem_ref);

impl AddAssign<&BigUint> for BigUint {
    fn add_assign(&mut self, other: &BigUint) {
        *self = self.add_ref(other);
    }
}

impl SubAssign<&BigUint> for BigUint {
    fn sub_assign(&mut self, other: &BigUint) {
        *self = self.sub_ref(other);
    }
}

impl MulAssign<&BigUint> for BigUint {
    fn mul_assign(&mut self, other: &BigUint) {
        *self = self.mul_ref(other);
    }
}

impl Shl<usize> for &BigUint {
    type Output = BigUint;
    fn shl(self, shift: usize) -> BigUint {
        self.shl_bits(shift)
    }
}

impl Shl<usize> for BigUint {
    type Output = BigUint;
    fn shl(self, shift: usize) -> BigUint {
        self.shl_bits(shift)
    }
}

impl Shr<usize> for &BigUint {
    type Output = BigUint;
    fn shr(self, shift: usize) -> BigUint {
        self.shr_bits(shift)
    }
}

impl Shr<usize> for BigUint {
    type Output = BigUint;
    fn shr(self, shift: usize) -> BigUint {
        self.shr_bits(shift)
    }
}

impl Integer for BigUint {
    fn div_floor(&self, other: &Self) -> Self {
        self.div_rem(other).0
    }

    fn mod_floor(&self, other: &Self) -> Self {
        self.div_rem(other).1
    }

    fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = &a % &b;
            a = b;
            b = r;
        }
        a
    }

    fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return BigUint::zero();
        }
        (self / self.gcd(other)) * other
    }

    fn is_multiple_of(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    fn is_even(&self) -> bool {
        self.limbs.first().map_or(true, |&l| l & 1 == 0)
    }

    fn is_odd(&self) -> bool {
        !self.is_even()
    }

    fn div_rem(&self, other: &Self) -> (Self, Self) {
        BigUint::div_rem(self, other)
    }
}

/// Error returned by [`Num::from_str_radix`] for [`BigUint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBigUintError;

impl fmt::Display for ParseBigUintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid digits for BigUint")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseBigUintError {}

impl Num for BigUint {
    type FromStrRadixErr = ParseBigUintError;

    fn from_str_radix(s: &str, radix: u32) -> core::result::Result<Self, ParseBigUintError> {
        if !(2..=36).contains(&radix) || s.is_empty() {
            return Err(ParseBigUintError);
        }
        let radix_big = BigUint::from(u64::from(radix));
        let mut out = BigUint::zero();
        for c in s.chars() {
            let digit = c.to_digit(radix).ok_or(ParseBigUintError)?;
            out = &out * &radix_big + BigUint::from(u64::from(digit));
        }
        Ok(out)
    }
}

impl From<u64> for BigUint {
    fn from(value: u64) -> Self {
        if value == 0 {
            BigUint::zero()
        } else {
            BigUint { limbs: vec![value] }
        }
    }
}

impl From<u32> for BigUint {
    fn from(value: u32) -> Self {
        BigUint::from(u64::from(value))
    }
}

impl FromPrimitive for BigUint {
    fn from_i64(n: i64) -> Option<Self> {
        if n < 0 {
            None
        } else {
            Some(BigUint::from(n as u64))
        }
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(BigUint::from(n))
    }
}

impl ToPrimitive for BigUint {
    fn to_i64(&self) -> Option<i64> {
        match self.to_u64() {
            Some(v) if v <= i64::MAX as u64 => Some(v as i64),
            _ => None,
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self.limbs.len() {
            0 => Some(0),
            1 => Some(self.limbs[0]),
            _ => None,
        }
    }
}

impl fmt::Display for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        // Peel 19 decimal digits per division.
        const CHUNK: u64 = 10_000_000_000_000_000_000;
        let chunk = BigUint::from(CHUNK);
        let mut groups = Vec::new();
        let mut n = self.clone();
        while !n.is_zero() {
            let (q, r) = n.div_rem(&chunk);
            groups.push(r.to_u64().unwrap_or(0));
            n = q;
        }
        write!(f, "{}", groups.pop().unwrap_or(0))?;
        for g in groups.iter().rev() {
            write!(f, "{:019}", g)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, limb) in self.limbs.iter().rev().enumerate() {
            if i == 0 {
                write!(f, "{:x}", limb)?;
            } else {
                write!(f, "{:016x}", limb)?;
            }
        }
        Ok(())
    }
}

impl Zeroize for BigUint {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.limbs.clear();
    }
}
