//! Two-party key exchange primitive
//!
//! [`KeyExchange`] is the contract consumed by role resolution: key pair
//! creation plus one derivation function per role. [`X25519Blake2b`] is the
//! production implementation, matching libsodium's `crypto_kx` output.

use blake2::{Blake2b512, Digest};
use x25519_dalek::{SharedSecret, StaticSecret};
use zeroize::Zeroize;

use crate::{
    error::KxError,
    keys::{
        KeyPair, PublicKey, SECRET_KEY_BYTES, SESSION_KEY_BYTES, SecretKey, SessionKey,
        SessionKeyPair,
    },
};

/// Key-exchange capability with role-specific session key derivation.
///
/// When a party derives as initiator and its peer derives as responder with
/// the complementary keys, the initiator's `receive` equals the responder's
/// `transmit` and vice versa.
pub trait KeyExchange: Send + Sync {
    /// Build a key pair from a uniformly random seed.
    ///
    /// Deterministic: the same seed always produces the same key pair.
    fn keypair_from_seed(&self, seed: &[u8; SECRET_KEY_BYTES]) -> KeyPair;

    /// Derive session keys as the initiator (the party with the smaller key).
    ///
    /// # Errors
    ///
    /// - `NonContributory`: the peer key is low-order or otherwise degenerate
    fn derive_as_initiator(
        &self,
        own_public: &PublicKey,
        own_secret: &SecretKey,
        peer_public: &PublicKey,
    ) -> Result<SessionKeyPair, KxError>;

    /// Derive session keys as the responder (the party with the larger key).
    ///
    /// # Errors
    ///
    /// - `NonContributory`: the peer key is low-order or otherwise degenerate
    fn derive_as_responder(
        &self,
        own_public: &PublicKey,
        own_secret: &SecretKey,
        peer_public: &PublicKey,
    ) -> Result<SessionKeyPair, KxError>;
}

/// X25519 key agreement with BLAKE2b-512 session key expansion.
///
/// Session keys are `BLAKE2b-512(q || initiator_pk || responder_pk)` split
/// into two 32-byte halves. The initiator receives on the first half and
/// transmits on the second; the responder does the opposite.
#[derive(Debug, Clone, Copy, Default)]
pub struct X25519Blake2b;

impl X25519Blake2b {
    /// Create the primitive.
    pub fn new() -> Self {
        Self
    }
}

impl KeyExchange for X25519Blake2b {
    fn keypair_from_seed(&self, seed: &[u8; SECRET_KEY_BYTES]) -> KeyPair {
        let secret = StaticSecret::from(*seed);
        let public = x25519_dalek::PublicKey::from(&secret);

        KeyPair::new(PublicKey::from_bytes(public.to_bytes()), SecretKey::from_bytes(*seed))
    }

    fn derive_as_initiator(
        &self,
        own_public: &PublicKey,
        own_secret: &SecretKey,
        peer_public: &PublicKey,
    ) -> Result<SessionKeyPair, KxError> {
        let shared = shared_secret(own_secret, peer_public)?;
        let (first, second) = expand_session_keys(&shared, own_public, peer_public);

        Ok(SessionKeyPair::new(first, second))
    }

    fn derive_as_responder(
        &self,
        own_public: &PublicKey,
        own_secret: &SecretKey,
        peer_public: &PublicKey,
    ) -> Result<SessionKeyPair, KxError> {
        let shared = shared_secret(own_secret, peer_public)?;
        let (first, second) = expand_session_keys(&shared, peer_public, own_public);

        Ok(SessionKeyPair::new(second, first))
    }
}

/// X25519 with an all-zero output check.
fn shared_secret(own_secret: &SecretKey, peer_public: &PublicKey) -> Result<SharedSecret, KxError> {
    let secret = StaticSecret::from(*own_secret.expose_secret());
    let shared = secret.diffie_hellman(&x25519_dalek::PublicKey::from(*peer_public.as_bytes()));

    if !shared.was_contributory() {
        return Err(KxError::NonContributory);
    }

    Ok(shared)
}

/// Hash the transcript and split it into the two directional keys.
///
/// Transcript order is fixed (initiator key first) so both sides hash the
/// same bytes.
fn expand_session_keys(
    shared: &SharedSecret,
    initiator_public: &PublicKey,
    responder_public: &PublicKey,
) -> (SessionKey, SessionKey) {
    let mut hasher = Blake2b512::new();
    hasher.update(shared.as_bytes());
    hasher.update(initiator_public.as_bytes());
    hasher.update(responder_public.as_bytes());
    let mut digest = hasher.finalize();

    let mut first = [0u8; SESSION_KEY_BYTES];
    let mut second = [0u8; SESSION_KEY_BYTES];
    first.copy_from_slice(&digest[..SESSION_KEY_BYTES]);
    second.copy_from_slice(&digest[SESSION_KEY_BYTES..]);
    digest.as_mut_slice().zeroize();

    let keys = (SessionKey::from_bytes(first), SessionKey::from_bytes(second));
    first.zeroize();
    second.zeroize();
    keys
}
