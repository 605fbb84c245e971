//! JSON and base64 scenario tests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pksign::bigint::BigUint;
use pksign::dsa::{DsaPrivateKey, DsaPublicKey};
use pksign::jwk::{b64url_decode, b64url_encode};
use pksign::rsa::{RsaPrivateKey, RsaPublicKey};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn url_safe_codec_known_answer() {
    let raw = hex::decode("53e9363b2962fcaf").unwrap();
    assert_eq!(b64url_encode(&raw), "U-k2Oyli_K8");
    assert_eq!(b64url_decode("U-k2Oyli_K8").unwrap(), raw);
    assert_eq!(b64url_decode("U-k2Oyli_K8=").unwrap(), raw);

    // The standard alphabet is rejected by the URL-safe decoder but
    // accepted by a standard-base64 decoder.
    assert!(b64url_decode("U+k2Oyli/K8=").is_err());
    assert_eq!(STANDARD.decode("U+k2Oyli/K8=").unwrap(), raw);

    assert!(b64url_decode("U-k2 Oyli_K8").is_err());
    assert!(b64url_decode("U-k2\nOyli_K8").is_err());
}

fn sample_rsa_key() -> RsaPrivateKey {
    let mut rng = ChaCha8Rng::from_seed([61; 32]);
    pksign::rsa::generate_key(&mut rng, 512).unwrap()
}

#[test]
fn rsa_json_round_trip() {
    let key = sample_rsa_key();
    let json = key.to_json().unwrap();
    assert!(json.contains("\"kty\":\"RSA\""));
    assert!(json.contains("\"ext\":true"));

    let decoded = RsaPrivateKey::from_json(&json).unwrap();
    assert_eq!(decoded, key);

    // A private JSON key parses as its public half too.
    let public = RsaPublicKey::from_json(&json).unwrap();
    assert_eq!(public, key.to_public_key());

    let pub_json = key.to_public_key().to_json().unwrap();
    let decoded = RsaPublicKey::from_json(&pub_json).unwrap();
    assert_eq!(decoded, key.to_public_key());
}

#[test]
fn rsa_json_rejects_malformed() {
    let key = sample_rsa_key();
    let json = key.to_json().unwrap();

    assert!(RsaPrivateKey::from_json("{").is_err());
    assert!(RsaPrivateKey::from_json("{}").is_err());

    // Wrong key type.
    let swapped = json.replace("\"RSA\"", "\"DSA\"");
    assert!(RsaPrivateKey::from_json(&swapped).is_err());

    // A standard-alphabet character inside a field is rejected.
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["n"] = serde_json::Value::String("AB+/".into());
    assert!(RsaPrivateKey::from_json(&value.to_string()).is_err());
}

fn sample_dsa_key() -> DsaPrivateKey {
    let mut rng = ChaCha8Rng::from_seed([62; 32]);
    let params = pksign::dsa::params_generate(&mut rng, 1024).unwrap();
    pksign::dsa::private_key_create(&mut rng, &params).unwrap()
}

#[test]
fn dsa_json_round_trip() {
    let key = sample_dsa_key();
    let json = key.to_json().unwrap();
    assert!(json.contains("\"kty\":\"DSA\""));

    let decoded = DsaPrivateKey::from_json(&json).unwrap();
    assert_eq!(decoded, key);

    let public = key.to_public_key();
    let decoded = DsaPublicKey::from_json(&public.to_json().unwrap()).unwrap();
    assert_eq!(decoded, public);
}

#[test]
fn dsa_json_recomputes_missing_y() {
    let key = sample_dsa_key();
    let json = key.to_json().unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value.as_object_mut().unwrap().remove("y");
    let decoded = DsaPrivateKey::from_json(&value.to_string()).unwrap();
    assert_eq!(decoded, key);
}

#[test]
fn padded_fields_are_accepted() {
    let key = sample_rsa_key();
    let json = key.to_json().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();

    // Re-encode n (64 bytes, so its base64 is padded) and check decode
    // tolerates the padding.
    let n_bytes = b64url_decode(value["n"].as_str().unwrap()).unwrap();
    let padded = base64::engine::general_purpose::URL_SAFE.encode(&n_bytes);
    assert!(padded.ends_with('='));
    value["n"] = serde_json::Value::String(padded);
    let decoded = RsaPrivateKey::from_json(&value.to_string()).unwrap();
    assert_eq!(decoded, key);
}

#[test]
fn canonical_trim_survives_round_trip() {
    // Fields with a high leading bit keep their exact canonical bytes.
    let n = BigUint::from_bytes_be(&[0xff, 0x00, 0x01]);
    let encoded = b64url_encode(&n.to_bytes_be());
    let back = BigUint::from_bytes_be(&b64url_decode(&encoded).unwrap());
    assert_eq!(back, n);
}
