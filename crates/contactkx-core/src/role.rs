//! Role assignment by public key ordering
//!
//! Two peers computing contact tokens independently must pick complementary
//! roles without exchanging anything beyond their public keys. The party with
//! the smaller key (byte-lexicographic) is the initiator, the other is the
//! responder.

use std::{cmp::Ordering, fmt};

use contactkx_crypto::{PublicKey, compare_bytes};

use crate::error::ContactError;

/// Role in the two-party key exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Holder of the smaller public key
    Initiator,
    /// Holder of the larger public key
    Responder,
}

impl Role {
    /// Resolve our role relative to a peer.
    ///
    /// Pure and stable: depends only on the two keys. Antisymmetric:
    /// `resolve(a, b)` and `resolve(b, a)` always give opposite roles.
    ///
    /// # Errors
    ///
    /// - `IdenticalPublicKeys`: the keys compare equal
    pub fn resolve(own: &PublicKey, peer: &PublicKey) -> Result<Self, ContactError> {
        match compare_bytes(own.as_bytes(), peer.as_bytes()) {
            Ordering::Less => Ok(Self::Initiator),
            Ordering::Greater => Ok(Self::Responder),
            Ordering::Equal => Err(ContactError::IdenticalPublicKeys { key_id: own.short_id() }),
        }
    }

    /// The role the peer holds when we hold `self`.
    pub fn counterpart(self) -> Self {
        match self {
            Self::Initiator => Self::Responder,
            Self::Responder => Self::Initiator,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initiator => f.write_str("initiator"),
            Self::Responder => f.write_str("responder"),
        }
    }
}
