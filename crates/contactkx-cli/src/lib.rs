//! Contact token self-test.
//!
//! Generates key pairs for Alice and Bob, publishes both public keys, lets
//! each side derive its contact tokens independently, and verifies that the
//! two sides agree. Optionally repeats the exchange between Alice and a
//! number of extra peers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::io::{self, Write};

use contactkx_core::{
    AgreementError, ContactError, Environment, Publisher, derive_for_peers,
    generate_contact_tokens, generate_keypair, verify_agreement,
};
use contactkx_crypto::{KeyExchange, KeyPair, PublicKey};
use thiserror::Error;
use tracing::{debug, info};

/// Demo configuration.
#[derive(Debug, Clone, Default)]
pub struct DemoConfig {
    /// Extra peers Alice establishes contacts with after the Alice/Bob run
    pub extra_peers: usize,
}

/// Errors that end the self-test.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Writing output or publishing a key failed
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    /// A party could not derive tokens or the two sides disagree
    #[error("self-test failed: {0}")]
    Agreement(#[from] AgreementError),

    /// Alice's derivation for an extra peer failed
    #[error("extra peer {index} rejected: {source}")]
    PeerRejected {
        /// Position of the peer in the extra peer list
        index: usize,
        /// Reason the derivation failed
        #[source]
        source: ContactError,
    },
}

impl From<ContactError> for DemoError {
    fn from(err: ContactError) -> Self {
        Self::Agreement(AgreementError::Contact(err))
    }
}

/// Outcome of a successful self-test.
#[derive(Debug, Clone)]
pub struct DemoReport {
    /// Alice's published key
    pub alice: PublicKey,
    /// Bob's published key
    pub bob: PublicKey,
    /// Contacts verified, including Alice/Bob
    pub contacts_verified: usize,
}

/// Run the self-test.
///
/// Public keys go to `publisher`; tokens and status lines go to `out`.
pub fn run_demo<K, E, P, W>(
    kx: &K,
    env: &E,
    publisher: &mut P,
    out: &mut W,
    config: &DemoConfig,
) -> Result<DemoReport, DemoError>
where
    K: KeyExchange + ?Sized,
    E: Environment,
    P: Publisher,
    W: Write,
{
    let alice = generate_keypair(kx, env);
    publisher.publish("Alice's public key", alice.public())?;

    let bob = generate_keypair(kx, env);
    publisher.publish("Bob's public key", bob.public())?;

    writeln!(out)?;

    // Each side only knows the other's public key
    let a = generate_contact_tokens(kx, &alice, bob.public())?;
    writeln!(out, "Alice's token for Bob2Alice:\t{}", a.receive().to_hex())?;
    writeln!(out, "Alice's token for Alice2Bob:\t{}", a.transmit().to_hex())?;

    let b = generate_contact_tokens(kx, &bob, alice.public())?;
    writeln!(out, "Bob's token for Alice2Bob:\t{}", b.receive().to_hex())?;
    writeln!(out, "Bob's token for Bob2Alice:\t{}", b.transmit().to_hex())?;

    verify_agreement(&a, &b)?;
    info!(alice = %alice.public().short_id(), bob = %bob.public().short_id(), "tokens agree");

    let verified = 1 + verify_extra_peers(kx, env, &alice, out, config.extra_peers)?;

    writeln!(
        out,
        "\nAlice and Bob now have a pair of contact tokens that they can use to send messages to each other"
    )?;

    Ok(DemoReport { alice: *alice.public(), bob: *bob.public(), contacts_verified: verified })
}

fn verify_extra_peers<K, E, W>(
    kx: &K,
    env: &E,
    alice: &KeyPair,
    out: &mut W,
    count: usize,
) -> Result<usize, DemoError>
where
    K: KeyExchange + ?Sized,
    E: Environment,
    W: Write,
{
    if count == 0 {
        return Ok(0);
    }

    let peers: Vec<KeyPair> = (0..count).map(|_| generate_keypair(kx, env)).collect();
    let peer_keys: Vec<PublicKey> = peers.iter().map(|p| *p.public()).collect();

    writeln!(out)?;
    let results = derive_for_peers(kx, alice, &peer_keys);
    for (index, (peer, (peer_key, ours))) in peers.iter().zip(results).enumerate() {
        let ours = ours.map_err(|source| DemoError::PeerRejected { index, source })?;
        let theirs = generate_contact_tokens(kx, peer, alice.public())?;
        verify_agreement(&ours, &theirs)?;

        debug!(index, peer = %peer_key.short_id(), "extra contact verified");
        writeln!(out, "Alice's contact {index} ({}):\tverified", peer_key.short_id())?;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use contactkx_core::{HexPublisher, env::test_utils::SeededEnv};
    use contactkx_crypto::{KxError, SECRET_KEY_BYTES, SecretKey, SessionKeyPair, X25519Blake2b};

    use super::*;

    fn run(seed: u64, extra_peers: usize) -> (DemoReport, String, String) {
        let kx = X25519Blake2b::new();
        let env = SeededEnv::new(seed);
        let mut publisher = HexPublisher::new(Vec::new());
        let mut out = Vec::new();

        let report =
            run_demo(&kx, &env, &mut publisher, &mut out, &DemoConfig { extra_peers }).unwrap();

        let published = String::from_utf8(publisher.into_inner()).unwrap();
        (report, published, String::from_utf8(out).unwrap())
    }

    fn token_after<'a>(output: &'a str, label: &str) -> &'a str {
        output
            .lines()
            .find_map(|line| line.strip_prefix(label))
            .and_then(|rest| rest.strip_prefix(":\t"))
            .unwrap()
    }

    #[test]
    fn publishes_both_public_keys() {
        let (report, published, _) = run(1, 0);

        assert_eq!(
            published,
            format!(
                "Alice's public key:\t{}\nBob's public key:\t{}\n",
                report.alice.to_hex(),
                report.bob.to_hex()
            )
        );
    }

    #[test]
    fn printed_tokens_match_across_parties() {
        let (report, _, output) = run(2, 0);

        assert_eq!(
            token_after(&output, "Alice's token for Bob2Alice"),
            token_after(&output, "Bob's token for Bob2Alice")
        );
        assert_eq!(
            token_after(&output, "Alice's token for Alice2Bob"),
            token_after(&output, "Bob's token for Alice2Bob")
        );
        assert_eq!(token_after(&output, "Alice's token for Alice2Bob").len(), 64);
        assert_eq!(report.contacts_verified, 1);
        assert!(output.ends_with("to send messages to each other\n"));
    }

    #[test]
    fn extra_peers_are_verified() {
        let (report, _, output) = run(3, 3);

        assert_eq!(report.contacts_verified, 4);
        assert_eq!(output.lines().filter(|l| l.ends_with("verified")).count(), 3);
    }

    #[test]
    fn same_seed_reproduces_output() {
        let (_, published_a, output_a) = run(4, 1);
        let (_, published_b, output_b) = run(4, 1);

        assert_eq!(published_a, published_b);
        assert_eq!(output_a, output_b);
    }

    struct ClosedPublisher;

    impl Publisher for ClosedPublisher {
        fn publish(&mut self, _label: &str, _key: &PublicKey) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "advertiser offline"))
        }
    }

    #[test]
    fn publish_failure_is_reported() {
        let kx = X25519Blake2b::new();
        let env = SeededEnv::new(5);

        let result =
            run_demo(&kx, &env, &mut ClosedPublisher, &mut Vec::<u8>::new(), &DemoConfig::default());

        assert!(matches!(result, Err(DemoError::Io(err)) if err.kind() == io::ErrorKind::BrokenPipe));
    }

    /// Real primitive that rejects every derivation after the first `healthy`.
    struct RejectingKx {
        inner: X25519Blake2b,
        healthy: usize,
        calls: AtomicUsize,
    }

    impl RejectingKx {
        fn after(healthy: usize) -> Self {
            Self { inner: X25519Blake2b::new(), healthy, calls: AtomicUsize::new(0) }
        }

        fn gate(&self) -> Result<(), KxError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.healthy {
                Ok(())
            } else {
                Err(KxError::NonContributory)
            }
        }
    }

    impl KeyExchange for RejectingKx {
        fn keypair_from_seed(&self, seed: &[u8; SECRET_KEY_BYTES]) -> KeyPair {
            self.inner.keypair_from_seed(seed)
        }

        fn derive_as_initiator(
            &self,
            own_public: &PublicKey,
            own_secret: &SecretKey,
            peer_public: &PublicKey,
        ) -> Result<SessionKeyPair, KxError> {
            self.gate()?;
            self.inner.derive_as_initiator(own_public, own_secret, peer_public)
        }

        fn derive_as_responder(
            &self,
            own_public: &PublicKey,
            own_secret: &SecretKey,
            peer_public: &PublicKey,
        ) -> Result<SessionKeyPair, KxError> {
            self.gate()?;
            self.inner.derive_as_responder(own_public, own_secret, peer_public)
        }
    }

    #[test]
    fn rejected_extra_peer_is_reported_with_index() {
        // Alice and Bob derive first, the extra peer is the third derivation
        let kx = RejectingKx::after(2);
        let env = SeededEnv::new(6);
        let mut publisher = HexPublisher::new(Vec::new());
        let mut out = Vec::<u8>::new();

        let result =
            run_demo(&kx, &env, &mut publisher, &mut out, &DemoConfig { extra_peers: 1 });

        let (index, source) = match result {
            Err(DemoError::PeerRejected { index, source }) => (index, source),
            other => panic!("expected PeerRejected, got {other:?}"),
        };
        assert_eq!(index, 0);
        assert!(matches!(
            source,
            ContactError::KeyExchangeFailed { source: KxError::NonContributory, .. }
        ));
        assert!(source.is_peer_fault());

        let output = String::from_utf8(out).unwrap();
        assert!(!output.contains("verified"));
        assert!(!output.contains("to send messages to each other"));
    }

    #[test]
    fn rejected_alice_bob_derivation_is_agreement_failure() {
        let kx = RejectingKx::after(0);
        let env = SeededEnv::new(7);

        let result = run_demo(
            &kx,
            &env,
            &mut HexPublisher::new(Vec::new()),
            &mut Vec::<u8>::new(),
            &DemoConfig { extra_peers: 1 },
        );

        assert!(matches!(
            result,
            Err(DemoError::Agreement(AgreementError::Contact(ContactError::KeyExchangeFailed {
                ..
            })))
        ));
    }
}
