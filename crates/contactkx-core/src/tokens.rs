//! Contact token generation
//!
//! Resolves the role against a peer and dispatches to the matching half of
//! the key exchange. Each call is independent, holds no shared state, and
//! can run in parallel with calls for other peers.

use contactkx_crypto::{KeyExchange, KeyPair, PublicKey, SECRET_KEY_BYTES, SessionKeyPair};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::{env::Environment, error::ContactError, role::Role};

/// Generate a fresh key pair using randomness from `env`.
pub fn generate_keypair<K, E>(kx: &K, env: &E) -> KeyPair
where
    K: KeyExchange + ?Sized,
    E: Environment,
{
    let mut seed = [0u8; SECRET_KEY_BYTES];
    env.random_bytes(&mut seed);
    let pair = kx.keypair_from_seed(&seed);
    seed.zeroize();

    debug!(public = %pair.public().short_id(), "generated key pair");
    pair
}

/// Derive our contact tokens for a peer.
///
/// The smaller public key derives as initiator, the larger as responder.
/// The peer running the same function with its own key pair and our public
/// key gets mirrored tokens: its `transmit` is our `receive` and vice versa.
///
/// # Errors
///
/// - `IdenticalPublicKeys`: our key and the peer's compare equal
/// - `KeyExchangeFailed`: the primitive rejected the peer key
pub fn generate_contact_tokens<K>(
    kx: &K,
    own: &KeyPair,
    peer: &PublicKey,
) -> Result<SessionKeyPair, ContactError>
where
    K: KeyExchange + ?Sized,
{
    let role = Role::resolve(own.public(), peer).inspect_err(|err| {
        warn!(own = %own.public().short_id(), %err, "refusing to derive contact tokens");
    })?;

    debug!(
        own = %own.public().short_id(),
        peer = %peer.short_id(),
        %role,
        "resolved contact role"
    );

    let derived = match role {
        Role::Initiator => kx.derive_as_initiator(own.public(), own.secret(), peer),
        Role::Responder => kx.derive_as_responder(own.public(), own.secret(), peer),
    };

    derived.map_err(|source| {
        warn!(peer = %peer.short_id(), %role, %source, "key exchange rejected peer key");
        ContactError::from_key_error(source, role)
    })
}

/// Derive contact tokens for several peers at once.
///
/// Failures are isolated per peer: an identical or degenerate key yields an
/// error for that entry only.
///
/// Returns (peer, result) pairs in input order.
pub fn derive_for_peers<K>(
    kx: &K,
    own: &KeyPair,
    peers: &[PublicKey],
) -> Vec<(PublicKey, Result<SessionKeyPair, ContactError>)>
where
    K: KeyExchange + ?Sized,
{
    peers.iter().map(|peer| (*peer, generate_contact_tokens(kx, own, peer))).collect()
}
