//! OpenSSL-shaped DER encodings of DSA parameters and keys.
//!
//! ```text
//! Dss-Parms      ::= SEQUENCE { p, q, g }
//! DSAPublicKey   ::= SEQUENCE { version (0), p, q, g, y }
//! DSAPrivateKey  ::= SEQUENCE { version (0), p, q, g, y, x }
//! ```
//!
//! On decode, a public key given as a bare `INTEGER y` (the historical
//! OpenSSL form, which carries its parameters out of band) is accepted by
//! [`DsaPublicKey::from_der_with_params`]; the `SEQUENCE` form is always
//! what gets emitted.

use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::der;
use crate::dsa::key::{DsaPrivateKey, DsaPublicKey};
use crate::dsa::params::DsaParams;
use crate::errors::Result;

impl DsaParams {
    /// Canonical `Dss-Parms` DER.
    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::new();
        der::encode_uint(&mut body, &self.p);
        der::encode_uint(&mut body, &self.q);
        der::encode_uint(&mut body, &self.g);
        der::encode_sequence(&body)
    }

    /// Parses `Dss-Parms` DER.
    pub fn from_der(input: &[u8]) -> Result<Self> {
        let mut outer = der::Reader::new(input);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        let p = seq.read_uint()?;
        let q = seq.read_uint()?;
        let g = seq.read_uint()?;
        seq.finish()?;

        Ok(DsaParams::from_components_unchecked(p, q, g))
    }
}

impl DsaPublicKey {
    /// Canonical `DSAPublicKey` DER (the 5-field `SEQUENCE` form).
    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::new();
        der::encode_uint(&mut body, &crate::bigint::BigUint::from(0u64));
        der::encode_uint(&mut body, &self.params.p);
        der::encode_uint(&mut body, &self.params.q);
        der::encode_uint(&mut body, &self.params.g);
        der::encode_uint(&mut body, &self.y);
        der::encode_sequence(&body)
    }

    /// Parses the `SEQUENCE` form of `DSAPublicKey`.
    pub fn from_der(input: &[u8]) -> Result<Self> {
        let mut outer = der::Reader::new(input);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        seq.read_version(0)?;
        let p = seq.read_uint()?;
        let q = seq.read_uint()?;
        let g = seq.read_uint()?;
        let y = seq.read_uint()?;
        seq.finish()?;

        Ok(DsaPublicKey::from_components_unchecked(
            DsaParams::from_components_unchecked(p, q, g),
            y,
        ))
    }

    /// Parses either `DSAPublicKey` form, supplying the parameters for
    /// the bare-`INTEGER` one.
    pub fn from_der_with_params(input: &[u8], params: &DsaParams) -> Result<Self> {
        let mut outer = der::Reader::new(input);
        if outer.peek_tag() == Some(0x02) {
            let y = outer.read_uint()?;
            outer.finish()?;
            return Ok(DsaPublicKey::from_components_unchecked(params.clone(), y));
        }
        Self::from_der(input)
    }
}

impl DsaPrivateKey {
    /// Canonical `DSAPrivateKey` DER.
    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::new();
        der::encode_uint(&mut body, &crate::bigint::BigUint::from(0u64));
        der::encode_uint(&mut body, &self.params.p);
        der::encode_uint(&mut body, &self.params.q);
        der::encode_uint(&mut body, &self.params.g);
        der::encode_uint(&mut body, &self.y);
        der::encode_uint(&mut body, &self.x);
        let out = der::encode_sequence(&body);
        body.zeroize();
        out
    }

    /// Parses `DSAPrivateKey` DER. Use [`DsaPrivateKey::validate`] to vet
    /// untrusted keys.
    pub fn from_der(input: &[u8]) -> Result<Self> {
        let mut outer = der::Reader::new(input);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        seq.read_version(0)?;
        let p = seq.read_uint()?;
        let q = seq.read_uint()?;
        let g = seq.read_uint()?;
        let y = seq.read_uint()?;
        let x = seq.read_uint()?;
        seq.finish()?;

        Ok(DsaPrivateKey::from_components_unchecked(
            DsaParams::from_components_unchecked(p, q, g),
            y,
            x,
        ))
    }
}
