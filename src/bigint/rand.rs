//! Random big integer sampling.
//!
//! An extension trait over [`rand_core::CryptoRngCore`], which is the only
//! randomness seam in the crate; every sampler rejects and redraws rather
//! than reducing, so no modular bias is introduced.

use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use super::BigUint;

/// Sampling of [`BigUint`] values from a cryptographically secure RNG.
pub trait RandBigUint {
    /// A uniform value in `[0, 2^bits)`.
    fn gen_biguint(&mut self, bits: usize) -> BigUint;

    /// A uniform value in `[0, bound)` by masked rejection sampling.
    ///
    /// # Panics
    ///
    /// Panics when `bound` is zero.
    fn gen_biguint_below(&mut self, bound: &BigUint) -> BigUint;

    /// A uniform value in `[1, bound - 1]`.
    ///
    /// Draws `⌈bitlen(bound)/8⌉` big-endian bytes and redraws until the
    /// value lands in range; the expected number of draws is constant.
    ///
    /// # Panics
    ///
    /// Panics when `bound < 2`, for which the range is empty.
    fn gen_biguint_nonzero_below(&mut self, bound: &BigUint) -> BigUint;
}

impl<R: CryptoRngCore + ?Sized> RandBigUint for R {
    fn gen_biguint(&mut self, bits: usize) -> BigUint {
        if bits == 0 {
            return BigUint::zero();
        }
        let mut buf = vec![0u8; (bits + 7) / 8];
        self.fill_bytes(&mut buf);
        let partial = bits % 8;
        if partial != 0 {
            buf[0] &= (1u8 << partial) - 1;
        }
        let out = BigUint::from_bytes_be(&buf);
        buf.zeroize();
        out
    }

    fn gen_biguint_below(&mut self, bound: &BigUint) -> BigUint {
        assert!(!bound.is_zero(), "empty sampling range");
        let bits = bound.bits();
        loop {
            let candidate = self.gen_biguint(bits);
            if &candidate < bound {
                return candidate;
            }
        }
    }

    fn gen_biguint_nonzero_below(&mut self, bound: &BigUint) -> BigUint {
        assert!(bound > &BigUint::one(), "empty sampling range");
        let len = (bound.bits() + 7) / 8;
        let mut buf = vec![0u8; len];
        loop {
            self.fill_bytes(&mut buf);
            let candidate = BigUint::from_bytes_be(&buf);
            if !candidate.is_zero() && &candidate < bound {
                buf.zeroize();
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn gen_respects_bit_bound() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        for bits in [1usize, 7, 8, 9, 63, 64, 65, 257] {
            for _ in 0..16 {
                let v = rng.gen_biguint(bits);
                assert!(v.bits() <= bits);
            }
        }
    }

    #[test]
    fn below_is_below() {
        let mut rng = ChaCha8Rng::from_seed([8; 32]);
        let bound = BigUint::from(1_000_003u64);
        for _ in 0..200 {
            assert!(rng.gen_biguint_below(&bound) < bound);
        }
    }

    #[test]
    fn nonzero_below_range() {
        let mut rng = ChaCha8Rng::from_seed([9; 32]);
        let bound = BigUint::from(257u64);
        let mut seen_small = false;
        for _ in 0..300 {
            let v = rng.gen_biguint_nonzero_below(&bound);
            assert!(!v.is_zero() && v < bound);
            if v < BigUint::from(32u64) {
                seen_small = true;
            }
        }
        assert!(seen_small, "sampler never produced a small value");
    }
}
