//! Hash collaborators for PKCS#1 v1.5 signatures.
//!
//! The signing engine only needs three things from a hash function: its
//! output size, the DigestInfo prefix binding its OID, and the digest
//! itself. [`Hashes`] enumerates the supported algorithms with the RFC
//! 8017 §9.2 prefixes hardcoded; the digests come from the RustCrypto
//! `digest` family.

use alloc::vec::Vec;

use digest::Digest;

/// What `sign` and `verify` need to know about a hash function.
pub trait Hash {
    /// Digest length in bytes.
    fn size(&self) -> usize;

    /// The DER DigestInfo prefix for this algorithm; empty for the
    /// prefixless TLS MD5/SHA-1 concatenation.
    fn asn1_prefix(&self) -> &'static [u8];

    /// Hashes `msg`.
    fn digest(&self, msg: &[u8]) -> Vec<u8>;
}

/// The provided hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hashes {
    /// MD5 (legacy interoperability only).
    Md5,
    /// SHA-1 (legacy interoperability only).
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
    /// RIPEMD-160.
    Ripemd160,
    /// The TLS 1.1 MD5 || SHA-1 concatenation, signed without a prefix.
    Md5Sha1,
}

fn digest_with<D: Digest>(msg: &[u8]) -> Vec<u8> {
    D::digest(msg).to_vec()
}

impl Hash for Hashes {
    fn size(&self) -> usize {
        match self {
            Hashes::Md5 => 16,
            Hashes::Sha1 => 20,
            Hashes::Sha224 => 28,
            Hashes::Sha256 => 32,
            Hashes::Sha384 => 48,
            Hashes::Sha512 => 64,
            Hashes::Ripemd160 => 20,
            Hashes::Md5Sha1 => 36,
        }
    }

    fn asn1_prefix(&self) -> &'static [u8] {
        match self {
            Hashes::Md5 => &[
                0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86,
                0xf7, 0x0d, 0x02, 0x05, 0x05, 0x00, 0x04, 0x10,
            ],
            Hashes::Sha1 => &[
                0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02,
                0x1a, 0x05, 0x00, 0x04, 0x14,
            ],
            Hashes::Sha224 => &[
                0x30, 0x2d, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01,
                0x65, 0x03, 0x04, 0x02, 0x04, 0x05, 0x00, 0x04, 0x1c,
            ],
            Hashes::Sha256 => &[
                0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01,
                0x65, 0x03, 0x04, 0x02, 0x01, 0x05, 0x00, 0x04, 0x20,
            ],
            Hashes::Sha384 => &[
                0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01,
                0x65, 0x03, 0x04, 0x02, 0x02, 0x05, 0x00, 0x04, 0x30,
            ],
            Hashes::Sha512 => &[
                0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01,
                0x65, 0x03, 0x04, 0x02, 0x03, 0x05, 0x00, 0x04, 0x40,
            ],
            Hashes::Ripemd160 => &[
                0x30, 0x20, 0x30, 0x08, 0x06, 0x06, 0x28, 0xcf, 0x06, 0x03,
                0x00, 0x31, 0x04, 0x14,
            ],
            Hashes::Md5Sha1 => &[],
        }
    }

    fn digest(&self, msg: &[u8]) -> Vec<u8> {
        match self {
            Hashes::Md5 => digest_with::<md5::Md5>(msg),
            Hashes::Sha1 => digest_with::<sha1::Sha1>(msg),
            Hashes::Sha224 => digest_with::<sha2::Sha224>(msg),
            Hashes::Sha256 => digest_with::<sha2::Sha256>(msg),
            Hashes::Sha384 => digest_with::<sha2::Sha384>(msg),
            Hashes::Sha512 => digest_with::<sha2::Sha512>(msg),
            Hashes::Ripemd160 => digest_with::<ripemd::Ripemd160>(msg),
            Hashes::Md5Sha1 => {
                let mut out = digest_with::<md5::Md5>(msg);
                out.extend_from_slice(&digest_with::<sha1::Sha1>(msg));
                out
            }
        }
    }
}

impl Hashes {
    /// All supported algorithms.
    pub const ALL: [Hashes; 8] = [
        Hashes::Md5,
        Hashes::Sha1,
        Hashes::Sha224,
        Hashes::Sha256,
        Hashes::Sha384,
        Hashes::Sha512,
        Hashes::Ripemd160,
        Hashes::Md5Sha1,
    ];
}
