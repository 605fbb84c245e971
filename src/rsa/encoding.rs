//! PKCS#1 DER encodings of RSA keys.
//!
//! `RSAPrivateKey ::= SEQUENCE { version, n, e, d, p, q, dp, dq, qinv }`
//! with version 0 (two-prime), and `RSAPublicKey ::= SEQUENCE { n, e }`.

use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::der;
use crate::errors::Result;
use crate::rsa::key::{RsaPrivateKey, RsaPublicKey};

impl RsaPublicKey {
    /// Canonical `RSAPublicKey` DER.
    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::new();
        der::encode_uint(&mut body, &self.n);
        der::encode_uint(&mut body, &self.e);
        der::encode_sequence(&body)
    }

    /// Parses `RSAPublicKey` DER. Strict: canonical form only, no
    /// trailing bytes.
    pub fn from_der(input: &[u8]) -> Result<Self> {
        let mut outer = der::Reader::new(input);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        let n = seq.read_uint()?;
        let e = seq.read_uint()?;
        seq.finish()?;

        Ok(RsaPublicKey::from_components_unchecked(n, e))
    }
}

impl RsaPrivateKey {
    /// Canonical two-prime `RSAPrivateKey` DER.
    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::new();
        der::encode_uint(&mut body, &crate::bigint::BigUint::from(0u64));
        der::encode_uint(&mut body, &self.n);
        der::encode_uint(&mut body, &self.e);
        der::encode_uint(&mut body, &self.d);
        der::encode_uint(&mut body, &self.p);
        der::encode_uint(&mut body, &self.q);
        der::encode_uint(&mut body, &self.dp);
        der::encode_uint(&mut body, &self.dq);
        der::encode_uint(&mut body, &self.qinv);
        let out = der::encode_sequence(&body);
        body.zeroize();
        out
    }

    /// Parses two-prime `RSAPrivateKey` DER, taking the CRT fields as
    /// encoded. Use [`RsaPrivateKey::validate`] to vet untrusted keys.
    pub fn from_der(input: &[u8]) -> Result<Self> {
        let mut outer = der::Reader::new(input);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        seq.read_version(0)?;
        let n = seq.read_uint()?;
        let e = seq.read_uint()?;
        let d = seq.read_uint()?;
        let p = seq.read_uint()?;
        let q = seq.read_uint()?;
        let dp = seq.read_uint()?;
        let dq = seq.read_uint()?;
        let qinv = seq.read_uint()?;
        seq.finish()?;

        Ok(RsaPrivateKey::from_parts(n, e, d, p, q, dp, dq, qinv))
    }
}
