//! DSA scenario tests: a fixed L=2048/N=256 domain with a known-nonce
//! signature, parameter validation, DER round trips, and the full
//! generate → sign → verify loop.

use pksign::bigint::BigUint;
use pksign::dsa::{self, DsaParams, DsaPrivateKey, DsaPublicKey, Signature};
use rand::{CryptoRng, RngCore};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod vectors {
    //! An L=2048, N=256 domain with key pair and a signature produced
    //! with the fixed nonce K over Z = SHA-256(b"abc").

    pub const P: &str = "b2846c951b621311f2afaa834e8564c030aa20810ba40b6cc1b98acf4eca7dc43445a68c21fad52eda5ce47a4a94e71ffb85bffb5ba5d06874d6c3530f8fea2edb737ba7b20f7d75195a0a3f031ba81a61f3c564376cd0ccb610ad12dd514c57add85907e5e45f744e8a6bb333719c09c112d5689951ae63f07acee0768a9fbd8c9b66b82ab07f32eca603d4e7b78777460f54a16ef0db6bcdbefbc1d8560c14a7a533c9097c773f08938ee3d68e0af7cd3991d8b9ca984826a1d3154a3da9d6f3508e5e6b8e1b2f36a840b8aff430f6871aaed4ff321ac40afdd0c68d4d75459fea217168ffd3111241d051d1122b95fd7263ab69a4e474f0fb62f3c9a1fe55";
    pub const Q: &str = "d111141dab800a79fa399a6c8aafb9d843f837acd8952b0bde06621a61899c6f";
    pub const G: &str = "31d2ef9bff8143fc8469641e9a174e2e179f998f889defb59d5af80f9e0b57c66dc3647c9af92cfd58d0c82a9de71c01bb3f2475c8190f30e7ffc9d798331f27c8ee168437727a7eca68c10e99bbb96698216640843f1ecafdd31637ec5637ddf346c26fa1b32d528542d0a1ebe7b75c0d8b22dd7c0246db84e670308dde1806c92fed6de4dcb4adc989103d062370897b307f3947d241fd521f0ed04815b6ea3ad264476bff8e41e478e99ede81487ff75874221c756e5dfe266e0d08be8f9508861692bb7fe566e62ae0e03bc026ddf891c2f0f7cf7ca0e740a2bafbf7bccb35127bd9a44b567fdcccf70b79db05325139762c34c9a15e1cd2bbb3a1d9e0c5";
    pub const X: &str = "85942cd953b55b9f289e73c18187b2a1777592dbd54043e8be58c0ff0c7b95ae";
    pub const Y: &str = "12ca93d05c329d57badaa494525581af8c84c9c1d34635c6f99fd04e2fbda0b7d148d2733868730060f90a35a90a3395fd20c45da957f9a4c782498371866c650b156def21388c876693a1892efc69765b9542fb79c127d07a4d7ff5e850f5538176e28e5f47e5536d21785d71955ae73eab058e66ded23a34ed28a3fd165f9c1326fef5adcfdeee9d78fdec1dd4e7084ce85b2d2d2933b71edeb6c9150b5acd052fc9f9ec416dabdb3440a33c0a2e5298a57430b10b41a3421a885485fba62d6e353a0cedf93b195fd1304d4ef5c537ab28e9ffab2ec7ca33ac89f4e93ace2c86d9fc9ad535a05d4c48eee1d0d08432445d1f254465be79c6bcc5da308f86a9";
    pub const K: &str = "6eeed12d5bf8eb948617a4f6baec964fa26bae8c280a95db3296c14d8461a869";
    /// SHA-256(b"abc"), the digest being signed.
    pub const Z: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
    pub const R: &str = "1340ef814e32f91e1fe162add7438984228d2bfcb82f94820a3a2b652b1c1135";
    pub const S: &str = "cc53e4ead19ea88057983064a8f4b858f18ce1149361d5a7581b67c4f2b36f32";
    pub const PARAMS_DER: &str = "3082022c0282010100b2846c951b621311f2afaa834e8564c030aa20810ba40b6cc1b98acf4eca7dc43445a68c21fad52eda5ce47a4a94e71ffb85bffb5ba5d06874d6c3530f8fea2edb737ba7b20f7d75195a0a3f031ba81a61f3c564376cd0ccb610ad12dd514c57add85907e5e45f744e8a6bb333719c09c112d5689951ae63f07acee0768a9fbd8c9b66b82ab07f32eca603d4e7b78777460f54a16ef0db6bcdbefbc1d8560c14a7a533c9097c773f08938ee3d68e0af7cd3991d8b9ca984826a1d3154a3da9d6f3508e5e6b8e1b2f36a840b8aff430f6871aaed4ff321ac40afdd0c68d4d75459fea217168ffd3111241d051d1122b95fd7263ab69a4e474f0fb62f3c9a1fe55022100d111141dab800a79fa399a6c8aafb9d843f837acd8952b0bde06621a61899c6f0282010031d2ef9bff8143fc8469641e9a174e2e179f998f889defb59d5af80f9e0b57c66dc3647c9af92cfd58d0c82a9de71c01bb3f2475c8190f30e7ffc9d798331f27c8ee168437727a7eca68c10e99bbb96698216640843f1ecafdd31637ec5637ddf346c26fa1b32d528542d0a1ebe7b75c0d8b22dd7c0246db84e670308dde1806c92fed6de4dcb4adc989103d062370897b307f3947d241fd521f0ed04815b6ea3ad264476bff8e41e478e99ede81487ff75874221c756e5dfe266e0d08be8f9508861692bb7fe566e62ae0e03bc026ddf891c2f0f7cf7ca0e740a2bafbf7bccb35127bd9a44b567fdcccf70b79db05325139762c34c9a15e1cd2bbb3a1d9e0c5";
}

fn big(hex_str: &str) -> BigUint {
    BigUint::from_bytes_be(&hex::decode(hex_str).unwrap())
}

fn test_params() -> DsaParams {
    DsaParams::new(big(vectors::P), big(vectors::Q), big(vectors::G)).unwrap()
}

fn test_key() -> DsaPrivateKey {
    DsaPrivateKey::from_components(test_params(), Some(big(vectors::Y)), big(vectors::X)).unwrap()
}

/// An "RNG" that replays a fixed byte script, for driving the signer to a
/// known nonce. Panics if more bytes are requested than scripted.
struct ReplayRng {
    script: Vec<u8>,
    pos: usize,
}

impl ReplayRng {
    fn new(script: Vec<u8>) -> Self {
        ReplayRng { script, pos: 0 }
    }
}

impl RngCore for ReplayRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_be_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_be_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let end = self.pos + dest.len();
        assert!(end <= self.script.len(), "nonce script exhausted");
        dest.copy_from_slice(&self.script[self.pos..end]);
        self.pos = end;
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ReplayRng {}

#[test]
fn known_nonce_reproduces_signature() {
    let key = test_key();
    let z = hex::decode(vectors::Z).unwrap();

    let mut rng = ReplayRng::new(hex::decode(vectors::K).unwrap());
    let sig = dsa::sign(&mut rng, &z, &key).unwrap();

    assert_eq!(hex::encode(sig.r()), vectors::R);
    assert_eq!(hex::encode(sig.s()), vectors::S);
    assert_eq!(sig.r().len(), 32);
    assert_eq!(sig.s().len(), 32);

    assert!(dsa::verify(&z, &sig, &key.to_public_key()));
}

#[test]
fn sign_verify_round_trip() {
    let mut rng = ChaCha8Rng::from_seed([41; 32]);
    let key = test_key();
    let public = dsa::public_key_create(&key);
    let z = hex::decode(vectors::Z).unwrap();

    let sig = dsa::sign(&mut rng, &z, &key).unwrap();
    assert!(dsa::verify(&z, &sig, &public));

    // Flipped signature bytes and messages must fail.
    let mut bad_r = sig.r().to_vec();
    bad_r[5] ^= 0x10;
    assert!(!dsa::verify(
        &z,
        &Signature::from_parts(bad_r, sig.s().to_vec()),
        &public
    ));

    let mut bad_z = z.clone();
    bad_z[0] ^= 0x01;
    assert!(!dsa::verify(&bad_z, &sig, &public));
}

#[test]
fn verify_rejects_out_of_range_halves() {
    let key = test_key();
    let public = key.to_public_key();
    let z = hex::decode(vectors::Z).unwrap();
    let q_bytes = hex::decode(vectors::Q).unwrap();
    let q_size = q_bytes.len();

    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let good = dsa::sign(&mut rng, &z, &key).unwrap();

    let zero = vec![0u8; q_size];
    // r = 0 and s = 0.
    assert!(!dsa::verify(
        &z,
        &Signature::from_parts(zero.clone(), good.s().to_vec()),
        &public
    ));
    assert!(!dsa::verify(
        &z,
        &Signature::from_parts(good.r().to_vec(), zero),
        &public
    ));
    // r = q and s = q.
    assert!(!dsa::verify(
        &z,
        &Signature::from_parts(q_bytes.clone(), good.s().to_vec()),
        &public
    ));
    assert!(!dsa::verify(
        &z,
        &Signature::from_parts(good.r().to_vec(), q_bytes.clone()),
        &public
    ));
    // Wrong widths.
    assert!(!dsa::verify(
        &z,
        &Signature::from_parts(good.r()[1..].to_vec(), good.s().to_vec()),
        &public
    ));
}

#[test]
fn params_validation() {
    let mut rng = ChaCha8Rng::from_seed([43; 32]);
    let params = test_params();
    assert!(dsa::params_verify(&mut rng, &params));

    // A single mutated generator byte breaks the subgroup relation.
    let mut g_bytes = big(vectors::G).to_bytes_be();
    g_bytes[17] ^= 0x20;
    let mutated = DsaParams::new(big(vectors::P), big(vectors::Q), BigUint::from_bytes_be(&g_bytes))
        .unwrap();
    assert!(!dsa::params_verify(&mut rng, &mutated));
}

#[test]
fn params_validation_rejects_square_cofactor() {
    use num_integer::Integer;
    use num_traits::{One, Zero};

    // A crafted domain with q² | p - 1: p and q are prime, q divides
    // p - 1, and g has order exactly q, yet g^((p-1)/q) ≡ 1 (mod p)
    // because the cofactor is itself a multiple of q. Validation must
    // reject it the way the cofactor-power check does.
    const P: &str = "8000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000026aafaf94f75135526a03e6072c149fa6c27acad8bdd5d1d8949b1b71ec97695ccc479a0f68be6387d1";
    const Q: &str = "efe7b9f548e38d8bf134bfe06244c61d552a7149";
    const G: &str = "26e4b53af0dcc9a144a09f3e2f640fff44558e4f4831025d9acaac63e64f3b638318eb3503921be35bdac1f16c200172333f776b642fba5ef40b34d23cc17f43c03c2ead5ffd84c7ffb04cf4f380154c9be9b64cd4b0ebf157e8913bd2d55a0fa22a2b514d8edfac6d565c51934b4a0e56e278160f5b9ca354da17c9a170f5b8";

    let params = DsaParams::new(big(P), big(Q), big(G)).unwrap();

    // The weaker relations all hold, so nothing before the cofactor
    // check tells this domain apart from a sound one.
    let pm1 = params.p() - BigUint::one();
    assert!(pm1.mod_floor(params.q()).is_zero());
    assert!((&pm1 / params.q()).mod_floor(params.q()).is_zero());
    assert!(params.g().modpow(params.q(), params.p()).is_one());
    assert!(!params.g().is_one());

    let mut rng = ChaCha8Rng::from_seed([48; 32]);
    assert!(!dsa::params_verify(&mut rng, &params));
}

#[test]
fn key_validation() {
    let mut rng = ChaCha8Rng::from_seed([44; 32]);
    let key = test_key();
    assert!(dsa::private_key_verify(&mut rng, &key));
    assert!(dsa::public_key_verify(&mut rng, &key.to_public_key()));

    // y inconsistent with x fails the private check.
    let bad = DsaPrivateKey::from_components(
        test_params(),
        Some(big(vectors::Y) + BigUint::from(1u64)),
        big(vectors::X),
    )
    .unwrap();
    assert!(!dsa::private_key_verify(&mut rng, &bad));
}

#[test]
fn compute_y_matches() {
    let params = test_params();
    assert_eq!(dsa::compute_y(&params, &big(vectors::X)), big(vectors::Y));

    // from_components fills in a missing y the same way.
    let key = DsaPrivateKey::from_components(params, None, big(vectors::X)).unwrap();
    assert_eq!(key.y(), &big(vectors::Y));
}

#[test]
fn der_round_trips() {
    let params = test_params();
    let der = params.to_der();
    assert_eq!(hex::encode(&der), vectors::PARAMS_DER);
    assert_eq!(DsaParams::from_der(&der).unwrap(), params);

    let key = test_key();
    let priv_der = key.to_der();
    let decoded = DsaPrivateKey::from_der(&priv_der).unwrap();
    assert_eq!(decoded, key);

    let public = key.to_public_key();
    let pub_der = public.to_der();
    let decoded = DsaPublicKey::from_der(&pub_der).unwrap();
    assert_eq!(decoded, public);

    // The bare-INTEGER public form decodes when parameters are supplied.
    // y's top byte is 0x12, so the 256-byte body needs no sign padding.
    let mut bare = Vec::new();
    let y = big(vectors::Y);
    bare.extend_from_slice(&[0x02, 0x82, 0x01, 0x00]);
    bare.extend_from_slice(&y.to_bytes_be());
    let from_bare = DsaPublicKey::from_der_with_params(&bare, &params).unwrap();
    assert_eq!(from_bare, public);

    // Trailing bytes fail.
    let mut trailing = priv_der.clone();
    trailing.push(0);
    assert!(DsaPrivateKey::from_der(&trailing).is_err());
}

#[test]
fn der_entry_points() {
    let mut rng = ChaCha8Rng::from_seed([45; 32]);
    let params_der = hex::decode(vectors::PARAMS_DER).unwrap();
    assert!(dsa::params_verify_der(&mut rng, &params_der));
    assert!(!dsa::params_verify_der(&mut rng, &params_der[..40]));

    let priv_der = dsa::private_key_create_der(&mut rng, &params_der).unwrap();
    let pub_der = dsa::public_key_create_der(&priv_der).unwrap();
    assert!(dsa::private_key_verify_der(&mut rng, &priv_der));
    assert!(dsa::public_key_verify_der(&mut rng, &pub_der));

    let z = hex::decode(vectors::Z).unwrap();
    let sig = dsa::sign_der(&mut rng, &z, &priv_der).unwrap();
    assert!(dsa::verify_der(&z, &sig, &pub_der));
}

#[test]
fn generate_params_and_keys() {
    use num_integer::Integer;
    use num_traits::{One, Zero};

    let mut rng = ChaCha8Rng::from_seed([46; 32]);
    let params = dsa::params_generate(&mut rng, 1024).unwrap();
    assert_eq!(params.p().bits(), 1024);
    assert_eq!(params.q().bits(), 160);

    // q | p - 1, and g generates the order-q subgroup.
    let pm1 = params.p() - BigUint::one();
    assert!(pm1.mod_floor(params.q()).is_zero());
    assert!(params.g().modpow(params.q(), params.p()).is_one());
    assert!(!params.g().is_one());

    let key = dsa::private_key_create(&mut rng, &params).unwrap();
    let z = [0x42u8; 20];
    let sig = dsa::sign(&mut rng, &z, &key).unwrap();
    assert_eq!(sig.r().len(), 20);
    assert!(dsa::verify(&z, &sig, &key.to_public_key()));
}

#[test]
fn message_bounds() {
    let mut rng = ChaCha8Rng::from_seed([47; 32]);
    let key = test_key();
    assert!(dsa::sign(&mut rng, &[], &key).is_err());
    assert!(dsa::sign(&mut rng, &[0u8; 65], &key).is_err());

    // Longer digests are truncated to the leftmost q-width bytes.
    let mut long = hex::decode(vectors::Z).unwrap();
    long.extend_from_slice(&[0xff; 16]);
    let sig = dsa::sign(&mut rng, &long, &key).unwrap();
    assert!(dsa::verify(&long, &sig, &key.to_public_key()));
    assert!(dsa::verify(
        &long[..32],
        &sig,
        &key.to_public_key()
    ));
}
