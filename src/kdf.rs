//! Key derivation engines generic over a keyed hash.

/// PBKDF2 (RFC 8018, section 5.2) over any keyed hash with guaranteed zeroization
/// of intermediate blocks.
pub mod pbkdf2 {
    use core::convert::TryFrom;

    use hmac::{
        digest::{FixedOutputReset, KeyInit, Output, OutputSizeUser},
        Mac,
    };
    use zeroize::Zeroize;

    use crate::error::Error;

    /// Transient per-block state: big-endian block counter, previous `U_j`, and `T_i`
    /// accumulator. Wiped on drop, so every exit path leaves it zeroed.
    pub(crate) struct BlockState<M: OutputSizeUser> {
        pub(crate) counter: [u8; 4],
        pub(crate) previous: Output<M>,
        pub(crate) block: Output<M>,
    }

    impl<M: OutputSizeUser> BlockState<M> {
        pub(crate) fn new() -> Self {
            BlockState {
                counter: [0u8; 4],
                previous: Default::default(),
                block: Default::default(),
            }
        }

        pub(crate) fn wipe(&mut self) {
            self.counter.zeroize();
            self.previous.as_mut_slice().zeroize();
            self.block.as_mut_slice().zeroize();
        }
    }

    impl<M: OutputSizeUser> Drop for BlockState<M> {
        fn drop(&mut self) {
            self.wipe();
        }
    }

    /// Erases output on drop unless derivation has run to completion, so an unwinding
    /// keyed hash never leaves a partially derived key behind.
    pub(crate) struct OutputGuard<'a> {
        pub(crate) output: &'a mut [u8],
        completed: bool,
    }

    impl<'a> OutputGuard<'a> {
        pub(crate) fn new(output: &'a mut [u8]) -> Self {
            OutputGuard {
                output,
                completed: false,
            }
        }

        pub(crate) fn complete(mut self) {
            self.completed = true;
        }
    }

    impl Drop for OutputGuard<'_> {
        fn drop(&mut self) {
            if !self.completed {
                self.output.zeroize();
            }
        }
    }

    /// Checks `iterations` and output length against the limits of RFC 8018 for a keyed
    /// hash with `hash_len` bytes of output.
    pub fn validate(output_len: usize, iterations: u32, hash_len: usize) -> Result<(), Error> {
        if iterations < 1 {
            return Err(Error::InvalidParameter { name: "iterations" });
        }

        // dkLen > (2^32 - 1) * hLen: the block counter would overflow.
        let max_len = (u32::MAX as u64).saturating_mul(hash_len as u64);
        if output_len as u64 > max_len {
            return Err(Error::InvalidParameter { name: "output" });
        }

        Ok(())
    }

    /// Fills `output` with PBKDF2 keying material using `M` keyed with `password` as PRF.
    ///
    /// One keyed context is created and reset after every digest instead of being re-keyed.
    /// Output is filled block by block: `T_i = U_1 ^ U_2 ^ ... ^ U_c`, the last block truncated.
    ///
    /// ```
    /// use hmac::Hmac;
    /// use sha2::Sha256;
    ///
    /// let mut key = [0u8; 20];
    /// pbkdf2_sha2::kdf::pbkdf2::derive::<Hmac<Sha256>>(&mut key, b"password", b"salt", 1)?;
    /// assert_eq!(&key[..4], &[0x12, 0x0f, 0xb6, 0xcf]);
    /// # Ok::<(), pbkdf2_sha2::Error>(())
    /// ```
    pub fn derive<M>(
        output: &mut [u8],
        password: &[u8],
        salt: &[u8],
        iterations: u32,
    ) -> Result<(), Error>
    where
        M: Mac + KeyInit + FixedOutputReset,
    {
        let hash_len = <M as OutputSizeUser>::output_size();
        validate(output.len(), iterations, hash_len)?;

        let mut prf = <M as KeyInit>::new_from_slice(password)?;
        let mut state = BlockState::<M>::new();
        let guard = OutputGuard::new(output);

        for (index, chunk) in guard.output.chunks_mut(hash_len).enumerate() {
            // Validated above: the block index fits into 32 bits.
            let i = u32::try_from(index + 1)
                .map_err(|_| Error::InvalidParameter { name: "output" })?;
            state.counter = i.to_be_bytes();

            // U_1 = PRF(P, S || INT(i))
            Mac::update(&mut prf, salt);
            Mac::update(&mut prf, &state.counter);
            FixedOutputReset::finalize_into_reset(&mut prf, &mut state.block);
            state.previous.copy_from_slice(&state.block);

            // U_j = PRF(P, U_{j-1})
            for _ in 1..iterations {
                Mac::update(&mut prf, &state.previous);
                FixedOutputReset::finalize_into_reset(&mut prf, &mut state.previous);

                state
                    .block
                    .iter_mut()
                    .zip(state.previous.iter())
                    .for_each(|(t, u)| *t ^= u);
            }

            chunk.copy_from_slice(&state.block[..chunk.len()]);
        }

        guard.complete();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::pbkdf2::{derive, validate, BlockState, OutputGuard};
    use crate::error::Error;

    use hmac::Hmac;
    use sha2::{Sha256, Sha384, Sha512};

    /// Independent PBKDF2 implementation to compare against.
    macro_rules! reference {
        ($hash:ty, $password:expr, $salt:expr, $iterations:expr, $len:expr) => {{
            let mut out = vec![0u8; $len];
            ::pbkdf2::pbkdf2_hmac::<$hash>($password, $salt, $iterations, &mut out);
            out
        }};
    }

    #[test]
    fn block_counter_is_big_endian() {
        // Two blocks: T_2 must be keyed with INT(2) = 00 00 00 02.
        let mut okm = [0u8; 64];
        derive::<Hmac<Sha256>>(&mut okm, b"passwd", b"salt", 1).unwrap();

        assert_eq!(
            hex::encode(okm),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc\
             49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783"
        );
    }

    #[test]
    fn matches_reference_sha256() {
        for len in [0, 1, 31, 32, 33, 64, 65, 100] {
            let mut okm = vec![0u8; len];
            derive::<Hmac<Sha256>>(&mut okm, b"password", b"salt", 3).unwrap();
            assert_eq!(okm, reference!(Sha256, b"password", b"salt", 3, len));
        }
    }

    #[test]
    fn matches_reference_sha384() {
        for len in [1, 47, 48, 49, 96, 97] {
            let mut okm = vec![0u8; len];
            derive::<Hmac<Sha384>>(&mut okm, b"secret", b"pepper", 5).unwrap();
            assert_eq!(okm, reference!(Sha384, b"secret", b"pepper", 5, len));
        }
    }

    #[test]
    fn matches_reference_sha512() {
        for len in [1, 63, 64, 65, 128, 150] {
            let mut okm = vec![0u8; len];
            derive::<Hmac<Sha512>>(&mut okm, b"", b"", 7).unwrap();
            assert_eq!(okm, reference!(Sha512, b"", b"", 7, len));
        }
    }

    #[test]
    fn long_password_is_hashed_as_key() {
        let password = [0x42u8; 200];
        let mut okm = [0u8; 40];
        derive::<Hmac<Sha512>>(&mut okm, &password, b"salt", 2).unwrap();
        assert_eq!(okm.to_vec(), reference!(Sha512, &password, b"salt", 2, 40));
    }

    #[test]
    fn zero_iterations_rejected_before_output_is_touched() {
        let mut okm = [0xAAu8; 32];
        let err = derive::<Hmac<Sha256>>(&mut okm, b"password", b"salt", 0).unwrap_err();

        assert_eq!(err, Error::InvalidParameter { name: "iterations" });
        assert_eq!(okm, [0xAAu8; 32]);
    }

    #[test]
    fn output_length_limit() {
        assert_eq!(validate(0, 1, 32), Ok(()));

        if usize::BITS > 32 {
            let max = (u32::MAX as usize) * 32;
            assert_eq!(validate(max, 1, 32), Ok(()));
            assert_eq!(
                validate(max + 1, 1, 32),
                Err(Error::InvalidParameter { name: "output" })
            );
        }
    }

    #[test]
    fn block_state_wipe() {
        let mut state = BlockState::<Hmac<Sha512>>::new();
        state.counter = 7u32.to_be_bytes();
        state.previous.iter_mut().for_each(|b| *b = 0xFF);
        state.block.iter_mut().for_each(|b| *b = 0xEE);

        state.wipe();

        assert_eq!(state.counter, [0u8; 4]);
        assert!(state.previous.iter().all(|&b| b == 0), "previous is not wiped");
        assert!(state.block.iter().all(|&b| b == 0), "block is not wiped");
    }

    #[test]
    fn incomplete_output_is_erased() {
        let mut okm = [0u8; 16];
        {
            let guard = OutputGuard::new(&mut okm);
            guard.output.copy_from_slice(&[0x5Au8; 16]);
        }
        assert_eq!(okm, [0u8; 16]);
    }

    #[test]
    fn completed_output_is_kept() {
        let mut okm = [0u8; 16];
        {
            let guard = OutputGuard::new(&mut okm);
            guard.output.copy_from_slice(&[0x5Au8; 16]);
            guard.complete();
        }
        assert_eq!(okm, [0x5Au8; 16]);
    }
}
