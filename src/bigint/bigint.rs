//! Signed big integers.
//!
//! A thin sign-and-magnitude wrapper over [`BigUint`]. It exists for the
//! extended Euclidean algorithm, whose Bezout coefficients alternate in
//! sign; it deliberately implements only the arithmetic that needs.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use super::BigUint;

/// Sign of a [`BigInt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Negative value.
    Minus,
    /// Zero.
    NoSign,
    /// Positive value.
    Plus,
}

/// An arbitrary precision signed integer.
#[derive(Clone, PartialEq, Eq)]
pub struct BigInt {
    sign: Sign,
    mag: BigUint,
}

impl BigInt {
    /// Builds a value from a sign and magnitude; the sign of a zero
    /// magnitude is forced to [`Sign::NoSign`].
    pub fn from_biguint(sign: Sign, mag: BigUint) -> Self {
        if mag.is_zero() {
            BigInt {
                sign: Sign::NoSign,
                mag,
            }
        } else {
            BigInt { sign, mag }
        }
    }

    /// True for values strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Minus
    }

    /// The magnitude, discarding the sign.
    pub fn magnitude(&self) -> &BigUint {
        &self.mag
    }

    /// The value as a [`BigUint`], or `None` when negative.
    pub fn to_biguint(&self) -> Option<BigUint> {
        match self.sign {
            Sign::Minus => None,
            _ => Some(self.mag.clone()),
        }
    }

    fn add_signed(&self, other: &BigInt) -> BigInt {
        match (self.sign, other.sign) {
            (Sign::NoSign, _) => other.clone(),
            (_, Sign::NoSign) => self.clone(),
            (a, b) if a == b => BigInt::from_biguint(a, &self.mag + &other.mag),
            (a, _) => match self.mag.cmp(&other.mag) {
                Ordering::Equal => BigInt::zero(),
                Ordering::Greater => BigInt::from_biguint(a, &self.mag - &other.mag),
                Ordering::Less => {
                    BigInt::from_biguint(other.sign, &other.mag - &self.mag)
                }
            },
        }
    }
}

impl From<BigUint> for BigInt {
    fn from(mag: BigUint) -> Self {
        BigInt::from_biguint(Sign::Plus, mag)
    }
}

impl Zero for BigInt {
    fn zero() -> Self {
        BigInt {
            sign: Sign::NoSign,
            mag: BigUint::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.sign == Sign::NoSign
    }
}

impl One for BigInt {
    fn one() -> Self {
        BigInt {
            sign: Sign::Plus,
            mag: BigUint::one(),
        }
    }

    fn is_one(&self) -> bool {
        self.sign == Sign::Plus && self.mag.is_one()
    }
}

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(mut self) -> BigInt {
        self.sign = match self.sign {
            Sign::Minus => Sign::Plus,
            Sign::NoSign => Sign::NoSign,
            Sign::Plus => Sign::Minus,
        };
        self
    }
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;
    fn add(self, other: &BigInt) -> BigInt {
        self.add_signed(other)
    }
}

impl Add<BigInt> for BigInt {
    type Output = BigInt;
    fn add(self, other: BigInt) -> BigInt {
        self.add_signed(&other)
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;
    fn sub(self, other: &BigInt) -> BigInt {
        self.add_signed(&other.clone().neg())
    }
}

impl Sub<BigInt> for BigInt {
    type Output = BigInt;
    fn sub(self, other: BigInt) -> BigInt {
        self.add_signed(&other.neg())
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;
    fn mul(self, other: &BigInt) -> BigInt {
        let sign = match (self.sign, other.sign) {
            (Sign::NoSign, _) | (_, Sign::NoSign) => Sign::NoSign,
            (a, b) if a == b => Sign::Plus,
            _ => Sign::Minus,
        };
        BigInt::from_biguint(sign, &self.mag * &other.mag)
    }
}

impl Mul<BigInt> for BigInt {
    type Output = BigInt;
    fn mul(self, other: BigInt) -> BigInt {
        (&self).mul(&other)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        fmt::Display::fmt(&self.mag, f)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> BigInt {
        let mag = BigUint::from(v.unsigned_abs());
        let sign = match v {
            0 => Sign::NoSign,
            v if v < 0 => Sign::Minus,
            _ => Sign::Plus,
        };
        BigInt::from_biguint(sign, mag)
    }

    #[test]
    fn signed_arithmetic() {
        assert_eq!(&int(5) + &int(-7), int(-2));
        assert_eq!(&int(-5) + &int(7), int(2));
        assert_eq!(&int(-5) - &int(7), int(-12));
        assert_eq!(&int(5) - &int(5), int(0));
        assert_eq!(&int(-3) * &int(-4), int(12));
        assert_eq!(&int(-3) * &int(4), int(-12));
        assert_eq!(&int(0) * &int(4), int(0));
        assert!((&int(0) + &int(0)).is_zero());
    }

    #[test]
    fn negation() {
        assert_eq!(int(5).neg(), int(-5));
        assert_eq!(int(0).neg(), int(0));
        assert!(int(-1).is_negative());
        assert!(!int(0).is_negative());
    }

    #[test]
    fn biguint_conversion() {
        assert_eq!(int(42).to_biguint(), Some(BigUint::from(42u64)));
        assert_eq!(int(-42).to_biguint(), None);
    }
}
