use core::{convert::TryFrom, fmt, str::FromStr};

use super::error::Error;

/// Safe resolving from a hash algorithm name to enum, case-insensitive.
macro_rules! match_name {
    ($name:expr, $($variant:expr => [$($alias:literal),+]),+) => {
        $(
            if [$($alias),+].iter().any(|alias| alias.eq_ignore_ascii_case($name)) {
                return Ok($variant);
            }
        )+
    };
}

/// Supported hash functions for HMAC, the pseudorandom function of PBKDF2.
///
/// Only SHA-2 is supported. MD5 and SHA-1 are not representable here and rejected
/// by name with [`Error::UnsupportedAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// HMAC-SHA-256, 32-byte blocks.
    Sha256,
    /// HMAC-SHA-384, 48-byte blocks.
    Sha384,
    /// HMAC-SHA-512, 64-byte blocks.
    Sha512,
}

impl HashAlgorithm {
    /// Output length of HMAC with this hash in bytes, also the length of one PBKDF2 block.
    pub const fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Canonical name, e.g. `SHA-256`.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HashAlgorithm::Sha256
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    /// Resolves `SHA256`/`SHA-256`, `SHA384`/`SHA-384`, `SHA512`/`SHA-512` in any case.
    ///
    /// ```
    /// # use pbkdf2_sha2::{Error, HashAlgorithm};
    /// assert_eq!("sha-512".parse(), Ok(HashAlgorithm::Sha512));
    /// assert_eq!("SHA1".parse::<HashAlgorithm>(), Err(Error::UnsupportedAlgorithm));
    /// ```
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match_name!(
            name,
            HashAlgorithm::Sha256 => ["SHA256", "SHA-256"],
            HashAlgorithm::Sha384 => ["SHA384", "SHA-384"],
            HashAlgorithm::Sha512 => ["SHA512", "SHA-512"]
        );

        Err(Error::UnsupportedAlgorithm)
    }
}

impl TryFrom<&str> for HashAlgorithm {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        name.parse()
    }
}
