#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::{algorithm::HashAlgorithm, derive_key, error::Error, KEY_SIZE};

/// Default count of PBKDF2 iterations.
///
/// NIST SP 800-132 recommends to choose an iteration count somewhere between 1000 and
/// 10_000_000, so the password derivation function can not be brute forced easily.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

// The largest HMAC-SHA-2 block.
const VERIFY_STACK_SIZE: usize = 64;

/// A set of PBKDF2 parameters: a hash function for HMAC and an iteration count.
///
/// # Basic Usage
/// ```
/// # use pbkdf2_sha2::{Error, HashAlgorithm, Params};
/// #
/// # fn main() -> Result<(), Error> {
/// let params = Params::default()
///     .with_algorithm(HashAlgorithm::Sha512)
///     .with_iterations(1000);
///
/// let key = params.derive(b"my password", b"0123456789abcdef")?;
/// assert!(params.verify(&key[..], b"my password", b"0123456789abcdef")?);
/// # Ok(())
/// # }
/// ```
///
/// # Default Configuration
/// | Option                      | Value      |
/// |-----------------------------|------------|
/// | [Hash](HashAlgorithm)       | SHA-256    |
/// | Iterations                  | 100 000    |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    algorithm: HashAlgorithm,
    iterations: u32,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            algorithm: HashAlgorithm::Sha256,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Params {
    /// Creates parameters with a given hash function and iteration count.
    ///
    /// Parameters are validated on derivation, not here.
    pub fn new(algorithm: HashAlgorithm, iterations: u32) -> Self {
        Params {
            algorithm,
            iterations,
        }
    }

    /// Hash function of HMAC.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Count of HMAC applications per output block.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Sets a hash function of HMAC.
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets an iteration count. Zero is rejected on derivation.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fills `output` with keying material of its length. See [`derive_key`].
    pub fn derive_into(
        &self,
        output: &mut [u8],
        password: &[u8],
        salt: &[u8],
    ) -> Result<(), Error> {
        derive_key(output, password, salt, self.iterations, self.algorithm)
    }

    /// Derives a 256-bit symmetric key from a password with guaranteed zeroization.
    pub fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
    ) -> Result<Zeroizing<[u8; KEY_SIZE]>, Error> {
        let mut key = Zeroizing::new([0u8; KEY_SIZE]);
        self.derive_into(&mut key[..], password, salt)?;
        Ok(key)
    }

    /// Derives `len` bytes of keying material into a vector wiped on drop.
    #[cfg(feature = "alloc")]
    #[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
    pub fn derive_vec(
        &self,
        len: usize,
        password: &[u8],
        salt: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        let mut key = Zeroizing::new(alloc::vec![0u8; len]);
        self.derive_into(key.as_mut_slice(), password, salt)?;
        Ok(key)
    }

    /// Derives a key of `expected.len()` bytes and compares it with `expected`
    /// in constant time.
    ///
    /// Returns `Ok(false)` on mismatch, `Err` only when parameters are rejected.
    /// An empty `expected` key is rejected: it would match any password.
    /// Without `alloc` feature `expected` is limited to 64 bytes.
    pub fn verify(&self, expected: &[u8], password: &[u8], salt: &[u8]) -> Result<bool, Error> {
        if expected.is_empty() {
            return Err(Error::InvalidParameter { name: "expected" });
        }

        let mut buf = Zeroizing::new([0u8; VERIFY_STACK_SIZE]);
        if expected.len() > buf.len() {
            return self.verify_long(expected, password, salt);
        }

        let derived = &mut buf[..expected.len()];
        self.derive_into(derived, password, salt)?;
        Ok(bool::from(derived.ct_eq(expected)))
    }

    #[cfg(feature = "alloc")]
    fn verify_long(&self, expected: &[u8], password: &[u8], salt: &[u8]) -> Result<bool, Error> {
        let derived = self.derive_vec(expected.len(), password, salt)?;
        Ok(bool::from(derived.as_slice().ct_eq(expected)))
    }

    #[cfg(not(feature = "alloc"))]
    fn verify_long(&self, _: &[u8], _: &[u8], _: &[u8]) -> Result<bool, Error> {
        Err(Error::InvalidParameter { name: "expected" })
    }
}
