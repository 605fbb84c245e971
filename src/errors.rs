//! Error types.

pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by key generation, validation, encoding and signing.
///
/// Verification never reports why it failed: the `verify` entry points
/// collapse every internal error into `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A bit size, hash choice or other parameter outside the allowed set.
    InvalidParameter,
    /// Malformed DER, base64 or JSON input.
    Decode,
    /// A key failed structural or algebraic validation.
    InvalidKey,
    /// The message plus padding does not fit in the modulus.
    MessageTooLong,
    /// DSA signing exhausted its retry budget.
    SignatureFailed,
    /// Signature verification failure. Internal; callers observe `false`.
    Verification,
    /// An internal consistency check failed (e.g. the CRT cross-check).
    Internal,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "invalid parameter"),
            Error::Decode => write!(f, "decoding error"),
            Error::InvalidKey => write!(f, "invalid key"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::SignatureFailed => write!(f, "signing failed"),
            Error::Verification => write!(f, "verification error"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
