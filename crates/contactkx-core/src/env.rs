//! Environment abstraction for deterministic testing.
//!
//! Decouples key generation from the source of randomness. Production uses
//! the OS RNG; tests use a seeded RNG so that generated key pairs, and
//! therefore role assignments, are reproducible.

/// Abstract environment providing randomness.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - Methods are infallible except in exceptional circumstances (e.g., OS
///   entropy exhaustion)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    /// - Uses cryptographically secure RNG
    fn random_bytes(&self, buffer: &mut [u8]);
}

/// Production environment backed by the OS RNG.
///
/// # Panics
///
/// Panics if the OS RNG fails. Key generation without working entropy would
/// produce guessable secret keys, so there is no safe fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - keys cannot be generated securely");
    }
}

/// Deterministic environments for tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    use std::sync::{Arc, Mutex, PoisonError};

    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use super::Environment;

    /// Environment with a seeded `ChaCha20` RNG.
    ///
    /// Clones share the RNG stream, so two parties generated from clones of
    /// the same environment still get distinct keys.
    #[derive(Clone)]
    pub struct SeededEnv {
        rng: Arc<Mutex<ChaCha20Rng>>,
    }

    impl SeededEnv {
        /// Create an environment whose byte stream is fixed by `seed`.
        pub fn new(seed: u64) -> Self {
            Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
        }
    }

    impl Environment for SeededEnv {
        fn random_bytes(&self, buffer: &mut [u8]) {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.fill_bytes(buffer);
        }
    }

    /// Environment that always fills buffers with the same byte.
    ///
    /// Every key pair generated from it is identical, which is how the
    /// identical-key path is exercised.
    #[derive(Clone, Copy)]
    pub struct FixedEnv {
        byte: u8,
    }

    impl FixedEnv {
        /// Create an environment that always yields `byte`.
        pub fn new(byte: u8) -> Self {
            Self { byte }
        }
    }

    impl Environment for FixedEnv {
        fn random_bytes(&self, buffer: &mut [u8]) {
            buffer.fill(self.byte);
        }
    }
}
