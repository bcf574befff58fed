//! # PBKDF2 with HMAC-SHA-2
//!
//! Derives a fixed-length key from a password and a salt with PBKDF2
//! ([RFC 8018, section 5.2](https://www.rfc-editor.org/rfc/rfc8018#section-5.2)),
//! using HMAC with SHA-256, SHA-384 or SHA-512 as a pseudorandom function.
//!
//! Legacy hash functions (MD5, SHA-1) are rejected with [`Error::UnsupportedAlgorithm`]
//! on purpose. Intermediate blocks are zeroized on every exit path; the keyed HMAC state
//! derived from the password belongs to `hmac` and is not wiped.
//!
//! # Basic Usage
//! ```
//! # use pbkdf2_sha2::{derive_key, Error, HashAlgorithm};
//! #
//! # fn main() -> Result<(), Error> {
//! let mut key = [0u8; 32];
//! derive_key(&mut key, b"password", b"salt", 4096, HashAlgorithm::Sha256)?;
//!
//! assert_eq!(&key[..4], &[0xc5, 0xe4, 0x78, 0xd5]);
//! # Ok(())
//! # }
//! ```
//!
//! A hash function can be chosen by its name:
//! ```
//! # use pbkdf2_sha2::{derive_key, Error, HashAlgorithm};
//! #
//! # fn main() -> Result<(), Error> {
//! let algorithm: HashAlgorithm = "SHA-512".parse()?;
//!
//! let mut key = [0u8; 64];
//! derive_key(&mut key, b"password", b"salt", 1000, algorithm)?;
//!
//! assert!("MD5".parse::<HashAlgorithm>().is_err());
//! # Ok(())
//! # }
//! ```
//!
//! # Parameters
//! [`Params`] holds a hash function and an iteration count with secure defaults,
//! derives zeroizing keys, and verifies a password against a stored key:
//! ```
//! # use pbkdf2_sha2::{generate_salt, Error, Params};
//! # use rand::{rngs::StdRng, SeedableRng};
//! #
//! # fn main() -> Result<(), Error> {
//! let salt = generate_salt(&mut StdRng::from_seed([0u8; 32]));
//!
//! // Attention: use the default (100 000) iterations or more in real life!
//! let params = Params::default().with_iterations(1000);
//! let key = params.derive(b"my password", &salt)?;
//!
//! assert!(params.verify(&key[..], b"my password", &salt)?);
//! assert!(!params.verify(&key[..], b"not my password", &salt)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Features
//!
//! | Feature     | Description                                                     |
//! |-------------|-----------------------------------------------------------------|
//! | `std`       | Enabled by default, implies `alloc`                             |
//! | `alloc`     | [`Params::derive_vec`], verification of keys longer than 64 bytes |
//! | `getrandom` | [`generate_salt_from_entropy`]                                  |
//! | `thiserror` | Derives `std::error::Error` for [`Error`] with `thiserror`      |
//!
//! # Logging
//!
//! Every derivation emits a `tracing` event at `DEBUG` level with a hash function,
//! an iteration count and an output length. Passwords, salts and keys are never logged.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, unused_qualifications)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod algorithm;
mod error;
pub mod kdf;
mod params;
mod salt;

use hmac::Hmac;
use sha2::{Sha256, Sha384, Sha512};

pub use algorithm::HashAlgorithm;
pub use error::Error;
pub use params::{Params, DEFAULT_ITERATIONS};
#[cfg(feature = "getrandom")]
pub use salt::generate_salt_from_entropy;
pub use salt::generate_salt;

/// Recommended size of a derived key in bytes (256-bit). Advisory only.
pub const KEY_SIZE: usize = 32;
/// Recommended size of a salt in bytes (128-bit). Advisory only.
pub const SALT_SIZE: usize = 16;

/// Fills `output` with keying material derived from `password` and `salt` using PBKDF2
/// with HMAC over the given SHA-2 hash function.
///
/// * `output` - a buffer of any length, block count is `ceil(len / hLen)`
/// * `password` - a password of any length, including zero
/// * `salt` - a salt of any length, including zero
/// * `iterations` - count of HMAC applications per block, must be at least 1
/// * `algorithm` - SHA-256, SHA-384 or SHA-512
///
/// Parameters are checked before any hashing work, so on error `output` is left untouched.
/// Treat an error as "no key material was derived".
///
/// # Errors
/// [`Error::InvalidParameter`] when `iterations` is zero or `output` is longer than
/// `(2^32 - 1) * hLen` bytes.
pub fn derive_key(
    output: &mut [u8],
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    algorithm: HashAlgorithm,
) -> Result<(), Error> {
    let hash_len = algorithm.output_len();
    if let Err(err) = kdf::pbkdf2::validate(output.len(), iterations, hash_len) {
        tracing::warn!(
            %algorithm,
            iterations,
            output_len = output.len(),
            %err,
            "PBKDF2 parameters rejected"
        );
        return Err(err);
    }

    tracing::debug!(
        %algorithm,
        iterations,
        output_len = output.len(),
        blocks = (output.len() + hash_len - 1) / hash_len,
        "deriving key with PBKDF2"
    );

    match algorithm {
        HashAlgorithm::Sha256 => {
            kdf::pbkdf2::derive::<Hmac<Sha256>>(output, password, salt, iterations)
        }
        HashAlgorithm::Sha384 => {
            kdf::pbkdf2::derive::<Hmac<Sha384>>(output, password, salt, iterations)
        }
        HashAlgorithm::Sha512 => {
            kdf::pbkdf2::derive::<Hmac<Sha512>>(output, password, salt, iterations)
        }
    }
}
