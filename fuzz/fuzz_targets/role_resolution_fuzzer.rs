//! Fuzz target for role resolution and contact token derivation
//!
//! # Strategy
//!
//! - Arbitrary 32-byte secret seeds for our own key pair
//! - Arbitrary peer public keys (including low-order and all-zero points)
//! - Arbitrary raw byte slices for the slice comparator
//!
//! # Invariants
//!
//! - Role resolution never panics and is antisymmetric
//! - Identical keys always yield `IdenticalPublicKeys`
//! - Derivation either succeeds or fails with `KeyExchangeFailed`
//! - Derivation is deterministic
//! - Slice comparison rejects mismatched lengths and otherwise matches `Ord`

#![no_main]

use arbitrary::Arbitrary;
use contactkx_core::{ContactError, Role, generate_contact_tokens};
use contactkx_crypto::{KeyExchange, KxError, PublicKey, X25519Blake2b, compare_slices};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct RoleScenario {
    /// Seed for our key pair
    own_seed: [u8; 32],
    /// Peer public key bytes (not necessarily a valid point)
    peer_key: [u8; 32],
    /// Raw slices for the slice comparator
    left: Vec<u8>,
    right: Vec<u8>,
}

fuzz_target!(|scenario: RoleScenario| {
    let kx = X25519Blake2b::new();
    let own = kx.keypair_from_seed(&scenario.own_seed);
    let peer = PublicKey::from_bytes(scenario.peer_key);

    match (Role::resolve(own.public(), &peer), Role::resolve(&peer, own.public())) {
        (Ok(ours), Ok(theirs)) => assert_eq!(ours, theirs.counterpart()),
        (Err(ContactError::IdenticalPublicKeys { .. }), Err(ContactError::IdenticalPublicKeys { .. })) => {
            assert_eq!(own.public(), &peer);
        },
        other => panic!("asymmetric role resolution: {other:?}"),
    }

    let first = generate_contact_tokens(&kx, &own, &peer);
    let second = generate_contact_tokens(&kx, &own, &peer);
    assert_eq!(first, second, "derivation must be deterministic");

    match first {
        Ok(_) | Err(ContactError::IdenticalPublicKeys { .. }) => {},
        Err(ContactError::KeyExchangeFailed { source: KxError::NonContributory, .. }) => {},
        Err(err) => panic!("unexpected derivation error: {err}"),
    }

    match compare_slices(&scenario.left, &scenario.right) {
        Ok(ordering) => {
            assert_eq!(scenario.left.len(), scenario.right.len());
            assert_eq!(ordering, scenario.left.cmp(&scenario.right));
        },
        Err(KxError::InvalidComparatorInput { left, right }) => {
            assert_eq!(left, scenario.left.len());
            assert_eq!(right, scenario.right.len());
            assert_ne!(left, right);
        },
        Err(err) => panic!("unexpected comparator error: {err}"),
    }
});
