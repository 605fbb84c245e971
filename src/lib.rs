//! Pure Rust RSA (PKCS#1 v1.5) and DSA signatures on top of a
//! self-contained big integer core.
//!
//! The crate exposes two signature engines and the plumbing they share:
//!
//! * [`rsa`]: key generation, validation and RSASSA-PKCS1-v1_5
//!   signing/verification, with CRT acceleration and blinding.
//! * [`dsa`]: FIPS 186-4 style parameter generation, key generation and
//!   (r, s) signing/verification.
//! * [`bigint`]: arbitrary precision integers with Montgomery
//!   exponentiation; private-key exponentiations run on a fixed-window
//!   ladder whose control flow does not depend on exponent bits.
//! * [`der`]: the minimal canonical DER subset (INTEGER, SEQUENCE) the
//!   PKCS#1-shaped key encodings need.
//! * [`jwk`]: JSON round-trips of keys with URL-safe base64 fields.
//!
//! Randomness is always supplied by the caller as a
//! [`rand_core::CryptoRngCore`]; the crate itself never seeds an RNG.
//!
//! # Example
//!
//! ```no_run
//! use pksign::hash::Hashes;
//! use pksign::rsa;
//!
//! # fn main() -> pksign::errors::Result<()> {
//! let mut rng = rand::thread_rng();
//! let key = rsa::generate_key(&mut rng, 2048)?;
//! let sig = rsa::sign(Some(&mut rng), &Hashes::Sha256, b"hello", &key)?;
//! assert!(rsa::verify(&Hashes::Sha256, b"hello", &sig, &key.to_public_key()));
//! # Ok(())
//! # }
//! ```

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod bigint;
pub mod der;
pub mod dsa;
pub mod errors;
pub mod hash;
pub mod jwk;
pub mod prime;
pub mod rsa;

pub use crate::bigint::{BigInt, BigUint};
pub use crate::errors::{Error, Result};
