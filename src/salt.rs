use rand::{CryptoRng, RngCore};

use super::SALT_SIZE;

/// Generates a random 128-bit salt.
///
/// 16 bytes is a minimum for PBKDF2 according to NIST SP 800-132. Salt is not a secret value
/// and is stored next to a derived key or verifier.
///
/// # Examples
/// ```
/// use pbkdf2_sha2::generate_salt;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// // Seed can be obtained by any cryptographically secure random generator.
/// let mut rng = StdRng::from_seed([7u8; 32]);
/// let salt = generate_salt(&mut rng);
/// assert_eq!(salt.len(), 16);
/// ```
pub fn generate_salt<R: RngCore + CryptoRng>(rng: &mut R) -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    rng.fill_bytes(&mut salt);
    salt
}

/// Generates a random salt seeding [`StdRng`](rand::rngs::StdRng) from OS entropy.
#[cfg(feature = "getrandom")]
#[cfg_attr(docs_rs, doc(cfg(feature = "getrandom")))]
pub fn generate_salt_from_entropy() -> [u8; SALT_SIZE] {
    use rand::{rngs::StdRng, SeedableRng};

    generate_salt(&mut StdRng::from_entropy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn salt_is_seeded() {
        let a = generate_salt(&mut StdRng::from_seed([1u8; 32]));
        let b = generate_salt(&mut StdRng::from_seed([1u8; 32]));
        let c = generate_salt(&mut StdRng::from_seed([2u8; 32]));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn salts_differ() {
        let mut rng = StdRng::from_seed([3u8; 32]);
        let a = generate_salt(&mut rng);
        let b = generate_salt(&mut rng);

        assert_ne!(a, b);
        assert_ne!(a, [0u8; SALT_SIZE]);
    }

    #[cfg(feature = "getrandom")]
    #[test]
    fn salt_from_entropy() {
        assert_ne!(generate_salt_from_entropy(), generate_salt_from_entropy());
    }
}
