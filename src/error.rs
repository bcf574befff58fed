#[cfg(not(feature = "thiserror"))]
use core::fmt;

use hmac::digest::InvalidLength;

/// Error variants produced by the key derivation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
pub enum Error {
    /// Hash algorithm is not one of SHA-256, SHA-384, SHA-512.
    ///
    /// Legacy algorithms (MD5, SHA-1) are rejected on purpose: SHA-2 should be used today.
    #[cfg_attr(
        feature = "thiserror",
        error("hash algorithm is not supported because SHA-2 should be used today")
    )]
    UnsupportedAlgorithm,
    /// A parameter is out of range: `iterations` is zero, or `output` is longer than
    /// `(2^32 - 1) * hLen` bytes.
    #[cfg_attr(feature = "thiserror", error("{name} is out of range"))]
    InvalidParameter {
        /// Name of the rejected parameter.
        name: &'static str,
    },
    /// The keyed hash refused the password as a key. Never happens with HMAC.
    #[cfg_attr(feature = "thiserror", error("invalid key length"))]
    InvalidKeyLength,
}

impl From<InvalidLength> for Error {
    fn from(_: InvalidLength) -> Self {
        Error::InvalidKeyLength
    }
}

#[cfg(not(feature = "thiserror"))]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedAlgorithm => {
                f.write_str("hash algorithm is not supported because SHA-2 should be used today")
            }
            Error::InvalidParameter { name } => write!(f, "{} is out of range", name),
            Error::InvalidKeyLength => f.write_str("invalid key length"),
        }
    }
}

#[cfg(all(feature = "std", not(feature = "thiserror")))]
impl std::error::Error for Error {}
