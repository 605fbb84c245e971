//! Best-effort differential timing check for the constant-time ladder.
//!
//! Two same-width exponents with very different Hamming weights are
//! exponentiated repeatedly, interleaved, and the mean timings compared.
//! Scheduling noise makes this inherently flaky on shared machines, so
//! the test is ignored by default; the acceptance ratio can be widened
//! with `PKSIGN_CT_BOUND` (percent, default 25).

use std::time::Instant;

use num_traits::One;
use pksign::bigint::BigUint;

fn big_hex(s: &str) -> BigUint {
    BigUint::from_bytes_be(&hex::decode(s).unwrap())
}

#[test]
#[ignore = "timing measurement; run manually on a quiet machine"]
fn modpow_consttime_is_exponent_independent() {
    let bound_percent: f64 = std::env::var("PKSIGN_CT_BOUND")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(25.0);

    // A fixed odd 1024-bit modulus and base.
    let modulus = (BigUint::one() << 1024usize) - big_hex("01231f");
    let base = big_hex("02a8f31ab9d52c77");

    // Equal bit length, extreme weight difference.
    let mut sparse = BigUint::one() << 1023usize;
    sparse.set_bit(0, true);
    let dense = (BigUint::one() << 1024usize) - BigUint::one();

    // Warm up.
    for _ in 0..3 {
        let _ = base.modpow_consttime(&sparse, &modulus);
        let _ = base.modpow_consttime(&dense, &modulus);
    }

    const ROUNDS: usize = 30;
    let mut sparse_total = 0f64;
    let mut dense_total = 0f64;
    for _ in 0..ROUNDS {
        let start = Instant::now();
        let _ = base.modpow_consttime(&sparse, &modulus);
        sparse_total += start.elapsed().as_secs_f64();

        let start = Instant::now();
        let _ = base.modpow_consttime(&dense, &modulus);
        dense_total += start.elapsed().as_secs_f64();
    }

    let sparse_mean = sparse_total / ROUNDS as f64;
    let dense_mean = dense_total / ROUNDS as f64;
    let ratio = (sparse_mean - dense_mean).abs() / sparse_mean.max(dense_mean);
    assert!(
        ratio * 100.0 < bound_percent,
        "mean timing difference {:.1}% exceeds {:.1}%",
        ratio * 100.0,
        bound_percent
    );
}

#[test]
fn consttime_and_vartime_agree() {
    let modulus = (BigUint::one() << 256usize) - big_hex("0129");
    let base = big_hex("deadbeef0123456789");
    let sparse = (BigUint::one() << 255usize) + BigUint::one();
    let dense = (BigUint::one() << 256usize) - BigUint::one();

    for exp in [sparse, dense] {
        assert_eq!(
            base.modpow_consttime(&exp, &modulus),
            base.modpow(&exp, &modulus)
        );
    }
}
