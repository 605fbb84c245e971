//! JSON round-trips of keys.
//!
//! Every big integer field travels as URL-safe base64 (RFC 4648 §5) of
//! its canonical trimmed big-endian bytes, unpadded on encode and
//! indifferent to padding on decode, inside a flat object:
//! `{ "kty": "RSA" | "DSA", <fields>, "ext": true }`.

use alloc::string::String;
use alloc::vec::Vec;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};

use crate::bigint::BigUint;
use crate::dsa::{DsaParams, DsaPrivateKey, DsaPublicKey};
use crate::errors::{Error, Result};
use crate::rsa::{RsaPrivateKey, RsaPublicKey};

/// Unpadded URL-safe base64 that tolerates padded input on decode and
/// rejects everything outside the alphabet.
const B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// URL-safe base64 without padding.
pub fn b64url_encode(bytes: &[u8]) -> String {
    B64.encode(bytes)
}

/// Decodes URL-safe base64, accepting both padded and unpadded input.
pub fn b64url_decode(text: &str) -> Result<Vec<u8>> {
    B64.decode(text).map_err(|_| Error::Decode)
}

fn field(value: &BigUint) -> String {
    b64url_encode(&value.to_bytes_be())
}

fn parse_field(text: &str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(&b64url_decode(text)?))
}

#[derive(Serialize, Deserialize)]
struct RsaPublicJwk {
    kty: String,
    n: String,
    e: String,
    ext: bool,
}

#[derive(Serialize, Deserialize)]
struct RsaPrivateJwk {
    kty: String,
    n: String,
    e: String,
    d: String,
    p: String,
    q: String,
    dp: String,
    dq: String,
    qi: String,
    ext: bool,
}

#[derive(Serialize, Deserialize)]
struct DsaPublicJwk {
    kty: String,
    p: String,
    q: String,
    g: String,
    y: String,
    ext: bool,
}

#[derive(Serialize, Deserialize)]
struct DsaPrivateJwk {
    kty: String,
    p: String,
    q: String,
    g: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<String>,
    x: String,
    ext: bool,
}

fn check_kty(got: &str, want: &str) -> Result<()> {
    if got == want {
        Ok(())
    } else {
        Err(Error::Decode)
    }
}

fn to_string<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|_| Error::Internal)
}

fn from_str<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T> {
    serde_json::from_str(json).map_err(|_| Error::Decode)
}

impl RsaPublicKey {
    /// Serializes to the JSON form.
    pub fn to_json(&self) -> Result<String> {
        to_string(&RsaPublicJwk {
            kty: String::from("RSA"),
            n: field(&self.n),
            e: field(&self.e),
            ext: true,
        })
    }

    /// Parses the JSON form; extra fields (e.g. the private ones) are
    /// ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let jwk: RsaPublicJwk = from_str(json)?;
        check_kty(&jwk.kty, "RSA")?;
        Ok(RsaPublicKey::from_components_unchecked(
            parse_field(&jwk.n)?,
            parse_field(&jwk.e)?,
        ))
    }
}

impl RsaPrivateKey {
    /// Serializes to the JSON form, private fields included.
    pub fn to_json(&self) -> Result<String> {
        to_string(&RsaPrivateJwk {
            kty: String::from("RSA"),
            n: field(&self.n),
            e: field(&self.e),
            d: field(&self.d),
            p: field(&self.p),
            q: field(&self.q),
            dp: field(&self.dp),
            dq: field(&self.dq),
            qi: field(&self.qinv),
            ext: true,
        })
    }

    /// Parses the JSON form. Use [`RsaPrivateKey::validate`] to vet
    /// untrusted keys.
    pub fn from_json(json: &str) -> Result<Self> {
        let jwk: RsaPrivateJwk = from_str(json)?;
        check_kty(&jwk.kty, "RSA")?;
        Ok(RsaPrivateKey::from_parts(
            parse_field(&jwk.n)?,
            parse_field(&jwk.e)?,
            parse_field(&jwk.d)?,
            parse_field(&jwk.p)?,
            parse_field(&jwk.q)?,
            parse_field(&jwk.dp)?,
            parse_field(&jwk.dq)?,
            parse_field(&jwk.qi)?,
        ))
    }
}

impl DsaPublicKey {
    /// Serializes to the JSON form.
    pub fn to_json(&self) -> Result<String> {
        to_string(&DsaPublicJwk {
            kty: String::from("DSA"),
            p: field(self.params.p()),
            q: field(self.params.q()),
            g: field(self.params.g()),
            y: field(&self.y),
            ext: true,
        })
    }

    /// Parses the JSON form; a private JSON key parses as its public
    /// half.
    pub fn from_json(json: &str) -> Result<Self> {
        let jwk: DsaPublicJwk = from_str(json)?;
        check_kty(&jwk.kty, "DSA")?;
        let params = DsaParams::from_components_unchecked(
            parse_field(&jwk.p)?,
            parse_field(&jwk.q)?,
            parse_field(&jwk.g)?,
        );
        Ok(DsaPublicKey::from_components_unchecked(
            params,
            parse_field(&jwk.y)?,
        ))
    }
}

impl DsaPrivateKey {
    /// Serializes to the JSON form, the secret exponent included.
    pub fn to_json(&self) -> Result<String> {
        to_string(&DsaPrivateJwk {
            kty: String::from("DSA"),
            p: field(self.params.p()),
            q: field(self.params.q()),
            g: field(self.params.g()),
            y: Some(field(&self.y)),
            x: field(&self.x),
            ext: true,
        })
    }

    /// Parses the JSON form. A missing `y` is recomputed from the
    /// parameters and x, which requires the parameters to pass their
    /// structural checks.
    pub fn from_json(json: &str) -> Result<Self> {
        let jwk: DsaPrivateJwk = from_str(json)?;
        check_kty(&jwk.kty, "DSA")?;
        let params = DsaParams::from_components_unchecked(
            parse_field(&jwk.p)?,
            parse_field(&jwk.q)?,
            parse_field(&jwk.g)?,
        );
        let x = parse_field(&jwk.x)?;
        let y = match jwk.y {
            Some(y) => parse_field(&y)?,
            None => {
                params.check_sanity().map_err(|_| Error::Decode)?;
                crate::dsa::compute_y(&params, &x)
            }
        };
        Ok(DsaPrivateKey::from_components_unchecked(params, y, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn b64url_known_answer() {
        let raw = hex!("53e9363b2962fcaf");
        assert_eq!(b64url_encode(&raw), "U-k2Oyli_K8");
        assert_eq!(b64url_decode("U-k2Oyli_K8").unwrap(), raw);
        // Padded input is tolerated.
        assert_eq!(b64url_decode("U-k2Oyli_K8=").unwrap(), raw);
    }

    #[test]
    fn b64url_rejects_standard_alphabet() {
        assert_eq!(b64url_decode("U+k2Oyli/K8="), Err(Error::Decode));
        assert_eq!(b64url_decode("U-k2 Oyli_K8"), Err(Error::Decode));
    }

    #[test]
    fn zero_field_is_empty_string() {
        use num_traits::Zero;
        assert_eq!(field(&BigUint::zero()), "");
        assert!(parse_field("").unwrap().is_zero());
    }
}
