//! Two-sided agreement check
//!
//! Runs the derivation once per party and confirms that both parties ended up
//! with mirrored tokens. Used by the demo binary as a self-test and by the
//! test suites.

use std::fmt;

use contactkx_crypto::{KeyExchange, KeyPair, SessionKey, SessionKeyPair, compare_bytes};
use tracing::{info, warn};

use crate::{error::AgreementError, role::Role, tokens::generate_contact_tokens};

/// Direction of travel between the two parties of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the first party to the second
    FirstToSecond,
    /// From the second party to the first
    SecondToFirst,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstToSecond => f.write_str("first-to-second"),
            Self::SecondToFirst => f.write_str("second-to-first"),
        }
    }
}

/// Tokens derived independently by both parties of a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    first_role: Role,
    first: SessionKeyPair,
    second: SessionKeyPair,
}

impl Contact {
    /// Role the first party derived as.
    pub fn first_role(&self) -> Role {
        self.first_role
    }

    /// Tokens derived by the first party.
    pub fn first(&self) -> &SessionKeyPair {
        &self.first
    }

    /// Tokens derived by the second party.
    pub fn second(&self) -> &SessionKeyPair {
        &self.second
    }

    /// Token for messages in `direction`.
    ///
    /// Both parties hold this token; the first party's copy is returned.
    pub fn token(&self, direction: Direction) -> &SessionKey {
        match direction {
            Direction::FirstToSecond => self.first.transmit(),
            Direction::SecondToFirst => self.first.receive(),
        }
    }
}

/// Check that two parties' tokens mirror each other.
///
/// # Errors
///
/// - `TokenMismatch`: `first.receive != second.transmit` or
///   `first.transmit != second.receive`
/// - `DegenerateTokens`: a party's receive and transmit tokens are equal
pub fn verify_agreement(
    first: &SessionKeyPair,
    second: &SessionKeyPair,
) -> Result<(), AgreementError> {
    if !same_token(first.transmit(), second.receive()) {
        return Err(AgreementError::TokenMismatch { direction: Direction::FirstToSecond });
    }

    if !same_token(first.receive(), second.transmit()) {
        return Err(AgreementError::TokenMismatch { direction: Direction::SecondToFirst });
    }

    if same_token(first.receive(), first.transmit()) {
        return Err(AgreementError::DegenerateTokens);
    }

    Ok(())
}

/// Derive tokens on both sides and verify they agree.
///
/// # Errors
///
/// - `Contact`: either side failed to derive (identical or degenerate keys)
/// - `TokenMismatch` / `DegenerateTokens`: see [`verify_agreement`]
pub fn establish_contact<K>(
    kx: &K,
    first: &KeyPair,
    second: &KeyPair,
) -> Result<Contact, AgreementError>
where
    K: KeyExchange + ?Sized,
{
    let first_role = Role::resolve(first.public(), second.public())?;
    let first_tokens = generate_contact_tokens(kx, first, second.public())?;
    let second_tokens = generate_contact_tokens(kx, second, first.public())?;

    verify_agreement(&first_tokens, &second_tokens).inspect_err(|err| {
        warn!(
            first = %first.public().short_id(),
            second = %second.public().short_id(),
            %err,
            "contact tokens disagree"
        );
    })?;

    info!(
        first = %first.public().short_id(),
        second = %second.public().short_id(),
        %first_role,
        "contact established"
    );

    Ok(Contact { first_role, first: first_tokens, second: second_tokens })
}

fn same_token(a: &SessionKey, b: &SessionKey) -> bool {
    compare_bytes(a.as_bytes(), b.as_bytes()).is_eq()
}

#[cfg(test)]
mod tests {
    use contactkx_crypto::{SESSION_KEY_BYTES, X25519Blake2b};

    use super::*;
    use crate::{
        env::test_utils::{FixedEnv, SeededEnv},
        error::ContactError,
        tokens::generate_keypair,
    };

    fn key(byte: u8) -> SessionKey {
        SessionKey::from_bytes([byte; SESSION_KEY_BYTES])
    }

    #[test]
    fn mirrored_tokens_agree() {
        let first = SessionKeyPair::new(key(1), key(2));
        let second = SessionKeyPair::new(key(2), key(1));

        assert_eq!(verify_agreement(&first, &second), Ok(()));
    }

    #[test]
    fn transmit_mismatch_is_reported() {
        let first = SessionKeyPair::new(key(1), key(2));
        let second = SessionKeyPair::new(key(3), key(1));

        assert_eq!(
            verify_agreement(&first, &second),
            Err(AgreementError::TokenMismatch { direction: Direction::FirstToSecond })
        );
    }

    #[test]
    fn receive_mismatch_is_reported() {
        let first = SessionKeyPair::new(key(1), key(2));
        let second = SessionKeyPair::new(key(2), key(3));

        assert_eq!(
            verify_agreement(&first, &second),
            Err(AgreementError::TokenMismatch { direction: Direction::SecondToFirst })
        );
    }

    #[test]
    fn identical_directions_are_degenerate() {
        let first = SessionKeyPair::new(key(9), key(9));
        let second = SessionKeyPair::new(key(9), key(9));

        assert_eq!(verify_agreement(&first, &second), Err(AgreementError::DegenerateTokens));
    }

    #[test]
    fn establish_contact_end_to_end() {
        let kx = X25519Blake2b::new();
        let env = SeededEnv::new(11);
        let alice = generate_keypair(&kx, &env);
        let bob = generate_keypair(&kx, &env);

        let contact = establish_contact(&kx, &alice, &bob).unwrap();

        assert_eq!(contact.first().receive(), contact.second().transmit());
        assert_eq!(contact.first().transmit(), contact.second().receive());
        assert_eq!(contact.token(Direction::FirstToSecond), contact.second().receive());
        assert_eq!(contact.token(Direction::SecondToFirst), contact.second().transmit());

        let expected_role =
            if alice.public() < bob.public() { Role::Initiator } else { Role::Responder };
        assert_eq!(contact.first_role(), expected_role);
    }

    #[test]
    fn establish_contact_is_symmetric_in_argument_order() {
        let kx = X25519Blake2b::new();
        let env = SeededEnv::new(12);
        let alice = generate_keypair(&kx, &env);
        let bob = generate_keypair(&kx, &env);

        let ab = establish_contact(&kx, &alice, &bob).unwrap();
        let ba = establish_contact(&kx, &bob, &alice).unwrap();

        assert_eq!(ab.first(), ba.second());
        assert_eq!(ab.second(), ba.first());
        assert_eq!(ab.first_role(), ba.first_role().counterpart());
    }

    #[test]
    fn establish_contact_with_identical_keys_fails() {
        let kx = X25519Blake2b::new();
        let env = FixedEnv::new(0x33);
        let a = generate_keypair(&kx, &env);
        let b = generate_keypair(&kx, &env);

        let result = establish_contact(&kx, &a, &b);
        assert!(matches!(
            result,
            Err(AgreementError::Contact(ContactError::IdenticalPublicKeys { .. }))
        ));
    }
}
